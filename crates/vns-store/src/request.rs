//! The command-surface contract.
//!
//! Front ends (the CLI, or anything else feeding the store) collect four
//! string fields and validate them into a [`Request`] before the store is
//! touched. A read carries only an identifier; a write also carries a link
//! and a hex-encoded signature.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Wire name of the read request.
pub const GET_REQUEST: &str = "name-record-get";
/// Wire name of the write request.
pub const SET_REQUEST: &str = "name-record-set";

/// Read or write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    #[serde(rename = "name-record-get")]
    Get,
    #[serde(rename = "name-record-set")]
    Set,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Get => GET_REQUEST,
            RequestKind::Set => SET_REQUEST,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestKind {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            GET_REQUEST => Ok(RequestKind::Get),
            SET_REQUEST => Ok(RequestKind::Set),
            other => Err(RequestError::UnknownRequestType(other.to_string())),
        }
    }
}

/// Raw, unvalidated request fields. Empty strings mean "not given".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub request_type: String,
    pub uid: String,
    pub link: String,
    pub sig: String,
}

/// A validated request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Get {
        identifier: String,
    },
    Set {
        identifier: String,
        link: String,
        signature: Vec<u8>,
    },
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::Get { .. } => RequestKind::Get,
            Request::Set { .. } => RequestKind::Set,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Request::Get { identifier } | Request::Set { identifier, .. } => identifier,
        }
    }
}

impl TryFrom<RequestOptions> for Request {
    type Error = RequestError;

    fn try_from(options: RequestOptions) -> Result<Self, Self::Error> {
        let kind: RequestKind = options.request_type.parse()?;
        if options.uid.is_empty() {
            return Err(RequestError::MissingField("uid"));
        }
        match kind {
            RequestKind::Get => {
                if !options.link.is_empty() {
                    return Err(RequestError::UnexpectedField("link"));
                }
                if !options.sig.is_empty() {
                    return Err(RequestError::UnexpectedField("sig"));
                }
                Ok(Request::Get {
                    identifier: options.uid,
                })
            }
            RequestKind::Set => {
                if options.link.is_empty() {
                    return Err(RequestError::MissingField("link"));
                }
                if options.sig.is_empty() {
                    return Err(RequestError::MissingField("sig"));
                }
                let signature = hex::decode(options.sig.trim())
                    .map_err(|e| RequestError::InvalidSignatureHex(e.to_string()))?;
                Ok(Request::Set {
                    identifier: options.uid,
                    link: options.link,
                    signature,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(request_type: &str, uid: &str, link: &str, sig: &str) -> RequestOptions {
        RequestOptions {
            request_type: request_type.into(),
            uid: uid.into(),
            link: link.into(),
            sig: sig.into(),
        }
    }

    #[test]
    fn parse_kinds() {
        assert_eq!("name-record-get".parse::<RequestKind>().unwrap(), RequestKind::Get);
        assert_eq!("name-record-set".parse::<RequestKind>().unwrap(), RequestKind::Set);
        assert!("name-record-delete".parse::<RequestKind>().is_err());
    }

    #[test]
    fn valid_get() {
        let req = Request::try_from(options(GET_REQUEST, "alice:0a", "", "")).unwrap();
        assert_eq!(req.kind(), RequestKind::Get);
        assert_eq!(req.identifier(), "alice:0a");
    }

    #[test]
    fn get_rejects_link_and_sig() {
        assert_eq!(
            Request::try_from(options(GET_REQUEST, "alice:0a", "ipfs://x", "")).unwrap_err(),
            RequestError::UnexpectedField("link")
        );
        assert_eq!(
            Request::try_from(options(GET_REQUEST, "alice:0a", "", "00")).unwrap_err(),
            RequestError::UnexpectedField("sig")
        );
    }

    #[test]
    fn valid_set_decodes_signature() {
        let req = Request::try_from(options(SET_REQUEST, "alice:0a", "ipfs://x", "00FF")).unwrap();
        assert_eq!(
            req,
            Request::Set {
                identifier: "alice:0a".into(),
                link: "ipfs://x".into(),
                signature: vec![0x00, 0xff],
            }
        );
    }

    #[test]
    fn set_requires_link_and_sig() {
        assert_eq!(
            Request::try_from(options(SET_REQUEST, "alice:0a", "", "00")).unwrap_err(),
            RequestError::MissingField("link")
        );
        assert_eq!(
            Request::try_from(options(SET_REQUEST, "alice:0a", "ipfs://x", "")).unwrap_err(),
            RequestError::MissingField("sig")
        );
    }

    #[test]
    fn set_rejects_non_hex_signature() {
        assert!(matches!(
            Request::try_from(options(SET_REQUEST, "alice:0a", "ipfs://x", "zz")).unwrap_err(),
            RequestError::InvalidSignatureHex(_)
        ));
    }

    #[test]
    fn uid_is_required() {
        assert_eq!(
            Request::try_from(options(GET_REQUEST, "", "", "")).unwrap_err(),
            RequestError::MissingField("uid")
        );
    }

    #[test]
    fn kind_serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&RequestKind::Set).unwrap(),
            "\"name-record-set\""
        );
    }
}
