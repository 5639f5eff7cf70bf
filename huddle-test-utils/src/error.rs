use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    SleeperError(#[from] sleeper_api::Error),
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}
