use std::io;

use rassid_core::{
    gateways::{flight_data::FlightDataError, payment::PaymentGatewayError},
    repositories::Error as RepoError,
    usecases::Error as ParameterError,
};
use thiserror::Error;

pub use rassid_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<rassid_core::usecases::Error> for AppError {
    fn from(err: rassid_core::usecases::Error) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<PaymentGatewayError> for AppError {
    fn from(err: PaymentGatewayError) -> Self {
        match err {
            // An unknown session reads like a missing row.
            PaymentGatewayError::SessionNotFound => RepoError::NotFound.into(),
            PaymentGatewayError::Other(err) => AppError::Other(err),
        }
    }
}

impl From<FlightDataError> for AppError {
    fn from(err: FlightDataError) -> Self {
        AppError::Other(err.into())
    }
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}
