pub mod error;

mod question;
mod shuffle;

pub use error::{Error, Result};
pub use question::Question;
pub use shuffle::shuffle;

use model::{
    session::{Answers, QuestionTimes},
    QuestionLayout, Quiz, Snapshot, Summary, TopicStats,
};
use rand::Rng;
use std::collections::{BTreeMap, HashSet};
use tokio::time::{Duration, Instant};

/// State machine for a single attempt at a quiz.
///
/// The engine is purely synchronous. Callers drive it with user actions (navigation, selection,
/// finishing) and with [`QuizEngine::tick`] once per elapsed second. Persisting the session is
/// up to the caller through [`QuizEngine::to_snapshot`] and [`QuizEngine::from_snapshot`].
#[derive(Debug)]
pub struct QuizEngine {
    title: String,
    time_limit_sec: u32,
    pass_threshold: f64,
    /// Shuffled once at construction. Never reordered afterwards.
    questions: Vec<Question>,
    current_index: usize,
    answers: Answers,
    remaining_sec: u32,
    is_finished: bool,
    question_times: QuestionTimes,
    summary: Option<Summary>,
    /// When the current question started accruing viewing time. Unarmed until the first
    /// navigation or tick of this process.
    marker: Option<Instant>,
}

fn validate(quiz: &Quiz) -> Result<()> {
    if quiz.questions.is_empty() {
        return Err(Error::NoQuestions);
    }

    if quiz.time_limit_sec == 0 {
        return Err(Error::InvalidTimeLimit);
    }

    if !(0.0..=1.0).contains(&quiz.pass_threshold) {
        return Err(Error::InvalidThreshold);
    }

    let mut seen = HashSet::with_capacity(quiz.questions.len());
    if let Some(dup) = quiz.questions.iter().find(|def| !seen.insert(def.id.as_str())) {
        log::debug!("question ID {} appears more than once", dup.id);
        return Err(Error::DuplicateQuestion);
    }

    Ok(())
}

/// Rebuilds the questions in a recorded order. Yields `None` if the layout does not describe
/// exactly the questions of `quiz`.
fn arrange(quiz: &Quiz, layout: &[QuestionLayout]) -> Option<Vec<Question>> {
    if layout.len() != quiz.questions.len() {
        return None;
    }

    let mut seen = HashSet::with_capacity(layout.len());
    layout
        .iter()
        .map(|entry| {
            if !seen.insert(entry.id.as_str()) {
                return None;
            }
            let def = quiz.questions.iter().find(|def| def.id == entry.id)?;
            Question::with_order(def, &entry.options).ok()
        })
        .collect()
}

impl QuizEngine {
    pub fn new(quiz: &Quiz) -> Result<Self> {
        Self::with_rng(quiz, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(quiz: &Quiz, rng: &mut R) -> Result<Self> {
        validate(quiz)?;

        // Options and questions are shuffled independently of each other.
        let questions: Vec<_> =
            quiz.questions.iter().map(|def| Question::with_rng(def, &mut *rng)).collect::<Result<_>>()?;
        let questions = shuffle(&questions, rng);
        log::debug!("prepared {} question(s) for {:?}", questions.len(), quiz.title);

        Ok(Self {
            title: quiz.title.clone(),
            time_limit_sec: quiz.time_limit_sec,
            pass_threshold: quiz.pass_threshold,
            questions,
            current_index: 0,
            answers: Answers::new(),
            remaining_sec: quiz.time_limit_sec,
            is_finished: false,
            question_times: QuestionTimes::new(),
            summary: None,
            marker: None,
        })
    }

    /// Resumes a session from the original definition plus a snapshot.
    ///
    /// The saved layout is reused when it still matches the definition. Otherwise questions and
    /// options are shuffled anew; answers and timings are keyed by question ID either way.
    pub fn from_snapshot(quiz: &Quiz, snapshot: Snapshot) -> Result<Self> {
        Self::from_snapshot_with_rng(quiz, snapshot, &mut rand::thread_rng())
    }

    pub fn from_snapshot_with_rng<R: Rng + ?Sized>(quiz: &Quiz, snapshot: Snapshot, rng: &mut R) -> Result<Self> {
        let mut engine = Self::with_rng(quiz, rng)?;
        let Snapshot { current_index, mut answers, remaining_sec, is_finished, summary, mut question_times, layout } =
            snapshot;

        if layout.is_empty() {
            log::debug!("snapshot carries no layout; keeping the fresh shuffle");
        } else if let Some(questions) = arrange(quiz, &layout) {
            engine.questions = questions;
        } else {
            log::warn!("saved layout no longer matches {:?}; reshuffling", quiz.title);
        }

        if current_index < engine.questions.len() {
            engine.current_index = current_index;
        } else {
            log::warn!("snapshot points at question {current_index} of {}; starting over", engine.questions.len());
        }

        let before = answers.len();
        answers.retain(|id, &mut option| {
            engine.questions.iter().any(|question| question.id() == id.as_str() && option < question.options().len())
        });
        if answers.len() != before {
            log::warn!("dropped {} stale answer(s) from snapshot", before - answers.len());
        }
        engine.answers = answers;

        question_times.retain(|id, _| engine.questions.iter().any(|question| question.id() == id.as_str()));
        engine.question_times = question_times;

        if let Some(remaining) = remaining_sec {
            if remaining > engine.time_limit_sec {
                log::warn!("snapshot has {remaining}s left of a {}s limit", engine.time_limit_sec);
            }
            engine.remaining_sec = remaining.min(engine.time_limit_sec);
        }

        engine.is_finished = is_finished;
        engine.summary = match summary {
            Some(_) if !is_finished => {
                log::warn!("unfinished snapshot carries a summary; discarding it");
                None
            }
            None if is_finished => {
                log::warn!("finished snapshot lacks a summary; recomputing");
                Some(engine.score())
            }
            summary => summary,
        };

        log::info!(
            "restored session for {:?} at question {} with {} answer(s) and {}s left",
            engine.title,
            engine.current_index,
            engine.answers.len(),
            engine.remaining_sec,
        );
        Ok(engine)
    }

    /// Value copy of the session state. Later mutations never leak into a returned snapshot.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            current_index: self.current_index,
            answers: self.answers.clone(),
            remaining_sec: Some(self.remaining_sec),
            is_finished: self.is_finished,
            summary: self.summary.clone(),
            question_times: self.question_times.clone(),
            layout: self.questions.iter().map(Question::layout).collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn time_limit_sec(&self) -> u32 {
        self.time_limit_sec
    }

    pub fn pass_threshold(&self) -> f64 {
        self.pass_threshold
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub const fn answers(&self) -> &Answers {
        &self.answers
    }

    pub const fn remaining_sec(&self) -> u32 {
        self.remaining_sec
    }

    pub const fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub const fn question_times(&self) -> &QuestionTimes {
        &self.question_times
    }

    pub const fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub const fn has_prev(&self) -> bool {
        self.current_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.questions.len()
    }

    /// Moves to the question at `index`, committing the viewing time of the one being left.
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        self.navigate(Some(index))
    }

    pub fn next(&mut self) -> Result<()> {
        self.navigate(self.current_index.checked_add(1))
    }

    pub fn prev(&mut self) -> Result<()> {
        self.navigate(self.current_index.checked_sub(1))
    }

    fn navigate(&mut self, target: Option<usize>) -> Result<()> {
        self.commit_time();
        let index = target.filter(|&index| index < self.questions.len()).ok_or(Error::OutOfRange)?;
        log::debug!("moving from question {} to {index}", self.current_index);
        self.current_index = index;
        self.marker = Some(Instant::now());
        Ok(())
    }

    /// Records `option` as the answer to the current question, replacing any earlier choice.
    pub fn select(&mut self, option: usize) -> Result<()> {
        if self.is_finished {
            return Err(Error::AlreadyFinished);
        }

        let question = &self.questions[self.current_index];
        if option >= question.options().len() {
            return Err(Error::InvalidOption);
        }

        log::debug!("question {} answered with option {option}", question.id());
        self.answers.insert(question.id().to_owned(), option);
        Ok(())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.answers.get(self.current_question().id()).copied()
    }

    /// Counts down one second. Finishes the session once the clock runs out.
    pub fn tick(&mut self) {
        if self.is_finished {
            return;
        }

        if self.marker.is_none() {
            self.marker = Some(Instant::now());
        }

        self.remaining_sec = self.remaining_sec.saturating_sub(1);
        if self.remaining_sec == 0 {
            log::info!("time is up for {:?}", self.title);
            self.finish();
        }
    }

    /// Ends the session and returns its summary. Calling this again returns the same summary
    /// without touching any state.
    pub fn finish(&mut self) -> &Summary {
        if self.is_finished {
            if let Some(summary) = self.summary.take() {
                return self.summary.insert(summary);
            }
        } else {
            self.commit_time();
            self.is_finished = true;
            self.marker = None;
        }

        let summary = self.score();
        log::info!(
            "finished {:?}: {}/{} correct, {}",
            self.title,
            summary.correct,
            summary.total,
            if summary.passed { "passed" } else { "failed" },
        );
        self.summary.insert(summary)
    }

    /// Adds the whole seconds spent on the current question since the marker.
    fn commit_time(&mut self) {
        if self.is_finished {
            return;
        }

        let Some(marker) = self.marker else {
            return;
        };

        // Only whole seconds move into the tally; the remainder stays with the marker.
        let secs = Instant::now().saturating_duration_since(marker).as_secs();
        let id = self.questions[self.current_index].id();
        *self.question_times.entry(id.to_owned()).or_default() += secs;
        self.marker = Some(marker + Duration::from_secs(secs));
    }

    fn score(&self) -> Summary {
        let mut correct = 0;
        let mut topic_stats = BTreeMap::<String, TopicStats>::new();
        for question in &self.questions {
            let is_correct = self.answers.get(question.id()).is_some_and(|&option| question.is_correct(option));
            if is_correct {
                correct += 1;
            }

            if let Some(topic) = question.topic().filter(|topic| !topic.is_empty()) {
                let stats = topic_stats.entry(topic.to_owned()).or_default();
                stats.total += 1;
                if is_correct {
                    stats.correct += 1;
                }
            }
        }

        let total = self.questions.len();
        let percent = if total == 0 { 0.0 } else { correct as f64 / total as f64 };
        Summary {
            correct,
            total,
            percent,
            passed: percent >= self.pass_threshold,
            topic_stats,
            question_times: self.question_times.clone(),
        }
    }
}
