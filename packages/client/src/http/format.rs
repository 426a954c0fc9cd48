//! Body formats
//!
//! Marshals request bodies and unmarshals response bodies as JSON, XML or
//! raw bytes.

use std::any::{Any, type_name};

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{self, Result};

/// Body format of a builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// application/json
    #[default]
    Json,
    /// application/xml
    Xml,
    /// Raw bytes, sent as-is without `Accept`/`Content-Type`
    Bytes,
}

/// Raw-bytes marshalling got something other than a byte buffer.
#[derive(Debug, thiserror::Error)]
#[error("bytes: body is {type_name} not a byte slice")]
pub struct NotByteSlice {
    type_name: &'static str,
}

/// The raw-bytes format has no typed decoding.
#[derive(Debug, thiserror::Error)]
#[error("bytes: cannot decode into {type_name}, read the raw body instead")]
pub struct RawBytesDecode {
    type_name: &'static str,
}

impl ContentType {
    /// MIME type for `Accept` and `Content-Type`, `None` for raw bytes.
    #[must_use]
    pub fn mime(self) -> Option<&'static str> {
        match self {
            ContentType::Json => Some("application/json"),
            ContentType::Xml => Some("application/xml"),
            ContentType::Bytes => None,
        }
    }

    /// Encode `body` for the wire.
    ///
    /// Raw bytes accept `Vec<u8>`, `Bytes` and `&'static [u8]` only.
    pub fn marshal<B>(self, body: &B) -> Result<Bytes>
    where
        B: Serialize + Any,
    {
        match self {
            ContentType::Json => serde_json::to_vec(body).map(Bytes::from).map_err(error::serialization),
            ContentType::Xml => quick_xml::se::to_string(body)
                .map(Bytes::from)
                .map_err(error::serialization),
            ContentType::Bytes => {
                let any = body as &dyn Any;
                if let Some(raw) = any.downcast_ref::<Vec<u8>>() {
                    Ok(Bytes::copy_from_slice(raw))
                } else if let Some(raw) = any.downcast_ref::<Bytes>() {
                    Ok(raw.clone())
                } else if let Some(raw) = any.downcast_ref::<&'static [u8]>() {
                    Ok(Bytes::from_static(raw))
                } else {
                    Err(error::serialization(NotByteSlice {
                        type_name: type_name::<B>(),
                    }))
                }
            }
        }
    }

    /// Decode a response body into `T`.
    pub fn unmarshal<T: DeserializeOwned>(self, body: &[u8]) -> Result<T> {
        match self {
            ContentType::Json => serde_json::from_slice(body).map_err(error::parse),
            ContentType::Xml => quick_xml::de::from_reader(body).map_err(error::parse),
            ContentType::Bytes => Err(error::parse(RawBytesDecode {
                type_name: type_name::<T>(),
            })),
        }
    }
}
