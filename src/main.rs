use quizkit::{load_quiz, Session};
use std::{env, path::PathBuf};
use store::FileStore;
use tokio::{
    io::{self, BufReader},
    runtime::Builder,
    signal,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse environment variables
    let quiz_path = env::var("QUIZ_PATH").unwrap_or_else(|_| String::from("data/questions.json"));
    let store = match env::var("STATE_PATH") {
        Ok(path) => FileStore::from(PathBuf::from(path)),
        _ => FileStore::default(),
    };

    let runtime = Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(async move {
        let quiz = load_quiz(&quiz_path).await?;
        log::info!("loaded {:?} from {quiz_path}", quiz.title);

        let mut session = Session::start(quiz, store).await?;
        tokio::select! {
            result = session.run(BufReader::new(io::stdin()), io::stdout()) => result?,
            result = signal::ctrl_c() => {
                result?;
                log::info!("interrupted");
            }
        }

        // The run loop saves on its own way out; an interrupt skips that.
        session.persist().await;
        anyhow::Ok(())
    })
}
