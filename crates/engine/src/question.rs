use crate::{
    error::{Error, Result},
    shuffle::shuffle,
};
use model::{session::QuestionLayout, QuestionDef};
use rand::Rng;

/// A question as presented in one session: options shuffled once, correct index remapped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    id: String,
    text: String,
    options: Vec<String>,
    /// Authored position of each displayed option.
    order: Vec<usize>,
    correct_index: usize,
    topic: Option<String>,
}

fn check(def: &QuestionDef) -> Result<()> {
    if def.options.len() < 2 {
        log::debug!("question {} has {} option(s)", def.id, def.options.len());
        return Err(Error::TooFewOptions);
    }

    if def.correct_index >= def.options.len() {
        log::debug!("question {} points its answer at option {}", def.id, def.correct_index);
        return Err(Error::AnswerOutOfRange);
    }

    Ok(())
}

impl Question {
    pub fn new(def: &QuestionDef) -> Result<Self> {
        Self::with_rng(def, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(def: &QuestionDef, rng: &mut R) -> Result<Self> {
        check(def)?;

        // Each option is tagged with its authored position so the answer survives the shuffle.
        let tags: Vec<_> = (0..def.options.len()).collect();
        Self::arrange(def, shuffle(&tags, rng))
    }

    /// Rebuilds a question with a previously recorded option order.
    pub fn with_order(def: &QuestionDef, order: &[usize]) -> Result<Self> {
        check(def)?;

        let mut seen = vec![false; def.options.len()];
        let is_permutation = order.len() == seen.len()
            && order.iter().all(|&original| seen.get_mut(original).is_some_and(|slot| !core::mem::replace(slot, true)));
        if !is_permutation {
            return Err(Error::InvalidLayout);
        }

        Self::arrange(def, order.to_vec())
    }

    fn arrange(def: &QuestionDef, order: Vec<usize>) -> Result<Self> {
        let correct_index =
            order.iter().position(|&original| original == def.correct_index).ok_or(Error::AnswerOutOfRange)?;
        let options = order.iter().map(|&original| def.options[original].clone()).collect();
        Ok(Self {
            id: def.id.clone(),
            text: def.text.clone(),
            options,
            order,
            correct_index,
            topic: def.topic.clone(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Position of the correct option within [`Self::options`].
    pub const fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub const fn is_correct(&self, option: usize) -> bool {
        option == self.correct_index
    }

    pub fn layout(&self) -> QuestionLayout {
        QuestionLayout { id: self.id.clone(), options: self.order.clone() }
    }
}
