use crate::{command::Command, error::Result, render};
use engine::QuizEngine;
use model::Quiz;
use store::Store;
use tokio::{
    io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    time::{self, Duration, Instant, MissedTickBehavior},
};

/// What the terminal should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    /// State changed: draw the whole view again.
    Redraw,
    /// Nothing changed: show a short message instead.
    Notice(&'static str),
    Quit,
}

fn navigated(result: engine::Result<()>) -> Flow {
    match result {
        Ok(()) => Flow::Redraw,
        Err(err) => {
            log::debug!("navigation rejected: {err}");
            Flow::Notice("No such question.")
        }
    }
}

/// One attempt at a quiz together with the place where it is persisted.
pub struct Session<S> {
    quiz: Quiz,
    engine: QuizEngine,
    store: S,
    /// Read-only listing of all questions. Purely a display concern.
    review: bool,
}

impl<S: Store> Session<S> {
    /// Resumes the saved session if there is one, otherwise starts afresh.
    pub async fn start(quiz: Quiz, store: S) -> Result<Self> {
        let engine = match store.load().await {
            Some(snapshot) => QuizEngine::from_snapshot(&quiz, snapshot)?,
            None => {
                let engine = QuizEngine::new(&quiz)?;
                log::info!("starting {:?} with {} question(s)", quiz.title, engine.len());
                engine
            }
        };
        Ok(Self { quiz, engine, store, review: false })
    }

    pub const fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn is_reviewing(&self) -> bool {
        self.review
    }

    /// Saves the current snapshot. Failures are logged and otherwise ignored.
    pub async fn persist(&self) {
        if let Err(err) = self.store.save(&self.engine.to_snapshot()).await {
            log::warn!("failed to save progress: {err}");
        }
    }

    fn can_prev(&self) -> bool {
        self.engine.has_prev() && !self.engine.is_finished()
    }

    fn can_next(&self) -> bool {
        self.engine.has_next() && self.engine.selected_index().is_some() && !self.engine.is_finished()
    }

    /// Forward jumps are allowed only over answered questions.
    fn can_go_to(&self, index: usize) -> bool {
        index <= self.engine.current_index()
            || self.engine.questions()[..index].iter().all(|question| self.engine.answers().contains_key(question.id()))
    }

    fn can_finish(&self) -> bool {
        !self.engine.has_next() && self.engine.selected_index().is_some() && !self.engine.is_finished()
    }

    pub async fn apply(&mut self, command: Command) -> Result<Flow> {
        if self.review && !matches!(command, Command::Restart | Command::Help | Command::Quit) {
            return Ok(Flow::Notice("Review is read-only. Type `restart` to try again or `q` to quit."));
        }

        let flow = match command {
            Command::Select(_) | Command::GoTo(_) if self.engine.is_finished() => Flow::Notice("The quiz is over."),
            Command::Select(option) => match self.engine.select(option) {
                Ok(()) => Flow::Redraw,
                Err(err) => {
                    log::debug!("selection rejected: {err}");
                    Flow::Notice("No such option.")
                }
            },
            Command::Next if !self.can_next() => Flow::Notice(if self.engine.selected_index().is_none() {
                "Pick an answer before moving on."
            } else {
                "There is no next question."
            }),
            Command::Prev if !self.can_prev() => Flow::Notice("There is no previous question."),
            Command::GoTo(index) if index >= self.engine.len() => Flow::Notice("No such question."),
            Command::GoTo(index) if !self.can_go_to(index) => {
                Flow::Notice("Answer the questions before that one first.")
            }
            Command::Next => navigated(self.engine.next()),
            Command::Prev => navigated(self.engine.prev()),
            Command::GoTo(index) => navigated(self.engine.go_to(index)),
            Command::Finish if !self.can_finish() => Flow::Notice(if self.engine.is_finished() {
                "The quiz is already finished."
            } else {
                "Answer the last question before finishing."
            }),
            Command::Finish => {
                self.engine.finish();
                Flow::Redraw
            }
            Command::Review if !self.engine.is_finished() => Flow::Notice("Review opens once the quiz is finished."),
            Command::Review => {
                self.review = true;
                Flow::Redraw
            }
            Command::Restart => {
                if let Err(err) = self.store.clear().await {
                    log::warn!("failed to clear saved progress: {err}");
                }
                self.engine = QuizEngine::new(&self.quiz)?;
                self.review = false;
                log::info!("restarted {:?}", self.quiz.title);
                Flow::Redraw
            }
            Command::Help => Flow::Notice(render::HELP),
            Command::Quit => Flow::Quit,
        };

        if flow == Flow::Redraw {
            self.persist().await;
        }
        Ok(flow)
    }

    /// Counts down one second and persists. Returns whether the session is now finished.
    pub async fn tick(&mut self) -> bool {
        self.engine.tick();
        self.persist().await;
        self.engine.is_finished()
    }

    /// Full text of the current screen.
    pub fn view(&self) -> String {
        let mut out = render::header(&self.engine);
        if self.review {
            out.push_str(&render::review(&self.engine));
        } else {
            out.push_str(&render::question(&self.engine));
        }

        if let Some(summary) = self.engine.summary() {
            out.push_str(&render::result(&self.engine, summary));
            if !self.review {
                out.push_str("\nType `r` to review your answers or `restart` to try again.\n");
            }
        }
        out
    }

    /// Drives the session from `input` lines and a one-second countdown until the user quits or
    /// the input ends. The countdown is only polled while the session is unfinished.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(self.view().as_bytes()).await?;
        output.flush().await?;

        let period = Duration::from_secs(1);
        let mut countdown = time::interval_at(Instant::now() + period, period);
        countdown.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            let text = tokio::select! {
                biased;
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    let command = match line.parse::<Command>() {
                        Ok(command) => command,
                        Err(err) => {
                            output.write_all(format!("{err}\n").as_bytes()).await?;
                            output.flush().await?;
                            continue;
                        }
                    };
                    match self.apply(command).await {
                        Ok(Flow::Redraw) => {
                            // A fresh session gets a full first second.
                            if command == Command::Restart {
                                countdown.reset();
                            }
                            self.view()
                        }
                        Ok(Flow::Notice(notice)) => format!("{notice}\n"),
                        Ok(Flow::Quit) => break,
                        Err(err) => {
                            log::error!("cannot apply {command:?}: {err}");
                            break;
                        }
                    }
                }
                _ = countdown.tick(), if !self.engine.is_finished() => {
                    if self.tick().await {
                        format!("\nTime is up!\n{}", self.view())
                    } else {
                        let remaining = self.engine.remaining_sec();
                        if remaining % 60 == 0 || remaining <= 10 {
                            format!("{} left\n", render::clock(remaining))
                        } else {
                            continue;
                        }
                    }
                }
            };
            output.write_all(text.as_bytes()).await?;
            output.flush().await?;
        }

        self.persist().await;
        output.flush().await
    }
}
