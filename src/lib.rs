//! Async client for the M-Pesa Daraja API: cached OAuth tokens, authenticated dispatch, and
//! provider error normalization behind typed payment operations.
//!
//! Every operation goes through one pipeline. The [`token::TokenCache`] hands out a valid
//! bearer token (refreshing lazily, single-flight), [`client::Client::send`] posts the JSON body,
//! and [`normalize`] turns any failure into an [`error::Error`] carrying an
//! [`normalize::ErrorReport`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod clock;
pub mod env;
pub mod error;
pub mod http;
pub mod normalize;
pub mod obs;
pub mod token;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")]
pub use client::ReqwestMpesaClient;
pub use client::Client;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
