//! Plain-text views of engine state. Nothing here mutates the session.

use engine::QuizEngine;
use model::Summary;

pub const HELP: &str = "\
Commands:
  1, 2, ...   select an option
  n / p       next / previous question
  g <k>       go to question k
  f           finish the quiz
  r           review all answers (after finishing)
  restart     discard progress and start over
  q           save and quit
";

/// Formats seconds as `mm:ss`.
pub fn clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn header(engine: &QuizEngine) -> String {
    format!(
        "== {} ==\nQuestion {} of {} | {}\n",
        engine.title(),
        engine.current_index() + 1,
        engine.len(),
        clock(engine.remaining_sec()),
    )
}

/// The current question with its options. The selected option is marked with `x`.
pub fn question(engine: &QuizEngine) -> String {
    let question = engine.current_question();
    let selected = engine.selected_index();
    let mut out = format!("\n{}\n", question.text());
    for (i, option) in question.options().iter().enumerate() {
        let mark = if selected == Some(i) { 'x' } else { ' ' };
        out.push_str(&format!("  [{mark}] {}. {option}\n", i + 1));
    }
    out
}

/// Every question with the correct option (`+`) and a wrong choice (`-`) highlighted.
pub fn review(engine: &QuizEngine) -> String {
    let mut out = String::new();
    for (index, question) in engine.questions().iter().enumerate() {
        out.push_str(&format!("\nQuestion {}: {}\n", index + 1, question.text()));
        let chosen = engine.answers().get(question.id()).copied();
        for (i, option) in question.options().iter().enumerate() {
            let mark = if question.is_correct(i) {
                '+'
            } else if chosen == Some(i) {
                '-'
            } else {
                ' '
            };
            let pick = if chosen == Some(i) { " (your answer)" } else { "" };
            out.push_str(&format!("  {mark} {}. {option}{pick}\n", i + 1));
        }
    }
    out
}

pub fn result(engine: &QuizEngine, summary: &Summary) -> String {
    let pct = (summary.percent * 100.0).round();
    let status = if summary.passed { "Passed" } else { "Failed" };
    let mut out = format!("\nResult: {} / {} ({pct}%) - {status}\n", summary.correct, summary.total);

    let times = &summary.question_times;
    let avg = if times.is_empty() {
        0
    } else {
        let sum: u64 = times.values().sum();
        (sum as f64 / times.len() as f64).round() as u64
    };
    out.push_str(&format!("Average time per question: {avg} s\n"));

    // Listed in the order the questions were presented.
    for question in engine.questions() {
        if let Some(secs) = times.get(question.id()) {
            out.push_str(&format!("  - {}: {secs} s\n", question.text()));
        }
    }

    if !summary.topic_stats.is_empty() {
        out.push_str("Topics:\n");
        for (topic, stats) in &summary.topic_stats {
            out.push_str(&format!("  - {topic}: {} / {}\n", stats.correct, stats.total));
        }
    }

    out
}
