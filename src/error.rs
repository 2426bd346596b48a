use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no nested at-rule found in the given CSS")]
    NoAtRuleFound,
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
