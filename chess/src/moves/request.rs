//! Move requests in coordinate notation

use super::base::PromoteKind;
use crate::types::{Coord, CoordParseError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a [`MoveRequest`] from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RequestParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(CoordParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(CoordParseError),
    /// Bad promote character
    #[error("bad promote char {0:?}")]
    BadPromote(char),
}

/// Move proposed by the caller
///
/// This is what a user interface produces: a source square, a destination square and, for a
/// pawn reaching the last rank, the chosen piece. The request itself is not validated, see
/// [`apply_move()`](super::apply_move).
///
/// In text form, the request is written in coordinate notation, like `e2e4` or `e7e8q`.
///
/// # Example
///
/// ```
/// # use rookery::{MoveRequest, PromoteKind};
/// #
/// let req: MoveRequest = "e7e8q".parse().unwrap();
/// assert_eq!(req.src.to_string(), "e7");
/// assert_eq!(req.dst.to_string(), "e8");
/// assert_eq!(req.promote, Some(PromoteKind::Queen));
/// assert_eq!(req.to_string(), "e7e8q");
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRequest {
    /// Source square
    pub src: Coord,
    /// Destination square
    pub dst: Coord,
    /// Piece to promote, if any
    #[cfg_attr(feature = "serde", serde(default))]
    pub promote: Option<PromoteKind>,
}

impl MoveRequest {
    /// Creates a request without promotion
    pub const fn new(src: Coord, dst: Coord) -> MoveRequest {
        MoveRequest {
            src,
            dst,
            promote: None,
        }
    }

    /// Creates a request from two square labels, like `"e2"` and `"e4"`
    pub fn from_labels(src: &str, dst: &str) -> Result<MoveRequest, RequestParseError> {
        Ok(MoveRequest::new(
            Coord::from_str(src).map_err(RequestParseError::BadSrc)?,
            Coord::from_str(dst).map_err(RequestParseError::BadDst)?,
        ))
    }

    /// Returns the same request with the promotion choice set to `promote`
    pub const fn with_promote(self, promote: PromoteKind) -> MoveRequest {
        MoveRequest {
            promote: Some(promote),
            ..self
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Some(p) = self.promote {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for MoveRequest {
    type Err = RequestParseError;

    fn from_str(s: &str) -> Result<MoveRequest, Self::Err> {
        if !s.is_ascii() || !matches!(s.len(), 4 | 5) {
            return Err(RequestParseError::BadLength);
        }
        let src = Coord::from_str(&s[0..2]).map_err(RequestParseError::BadSrc)?;
        let dst = Coord::from_str(&s[2..4]).map_err(RequestParseError::BadDst)?;
        let promote = match s.as_bytes().get(4) {
            Some(&b) => Some(
                PromoteKind::from_char(b as char)
                    .ok_or(RequestParseError::BadPromote(b as char))?,
            ),
            None => None,
        };
        Ok(MoveRequest { src, dst, promote })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    #[test]
    fn test_simple() {
        let e2 = Coord::from_parts(File::E, Rank::R2);
        let e4 = Coord::from_parts(File::E, Rank::R4);
        assert_eq!(
            MoveRequest::from_str("e2e4"),
            Ok(MoveRequest {
                src: e2,
                dst: e4,
                promote: None
            })
        );
        assert_eq!(MoveRequest::from_labels("e2", "e4"), Ok(MoveRequest::new(e2, e4)));
        assert_eq!(MoveRequest::new(e2, e4).to_string(), "e2e4");
    }

    #[test]
    fn test_promote() {
        let req = MoveRequest::from_str("b2a1N").unwrap();
        assert_eq!(req.promote, Some(PromoteKind::Knight));
        assert_eq!(req.to_string(), "b2a1n");
        assert_eq!(
            MoveRequest::new(req.src, req.dst).with_promote(PromoteKind::Knight),
            req
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(MoveRequest::from_str("e2e"), Err(RequestParseError::BadLength));
        assert_eq!(
            MoveRequest::from_str("e2e4qq"),
            Err(RequestParseError::BadLength)
        );
        assert_eq!(MoveRequest::from_str("é2e4"), Err(RequestParseError::BadLength));
        assert_eq!(
            MoveRequest::from_str("e9e4"),
            Err(RequestParseError::BadSrc(CoordParseError::UnexpectedRankChar(
                '9'
            )))
        );
        assert_eq!(
            MoveRequest::from_str("e2z4"),
            Err(RequestParseError::BadDst(CoordParseError::UnexpectedFileChar(
                'z'
            )))
        );
        assert_eq!(
            MoveRequest::from_str("e7e8k"),
            Err(RequestParseError::BadPromote('k'))
        );
        assert_eq!(
            MoveRequest::from_labels("e2", "e44"),
            Err(RequestParseError::BadDst(CoordParseError::BadLength))
        );
    }
}
