//! A library for manipulating python version numbers, implementing the
//! [PEP 440](https://peps.python.org/pep-0440) scheme: parsing version
//! strings into a structured representation, comparing and ordering them,
//! and deterministically deriving the next version for the common
//! release-management moves.
//!
//! ```rust
//! use std::str::FromStr;
//! use newversion::{DevTarget, Version};
//!
//! let version = Version::from_str("1.2.3rc3").unwrap();
//! assert_eq!(version.bump_major(1).to_string(), "2.0.0");
//! assert_eq!(version.get_stable().to_string(), "1.2.3");
//!
//! let snapshot = Version::from_str("1.2.3").unwrap().bump_dev(1, DevTarget::default());
//! assert_eq!(snapshot.to_string(), "1.2.4.dev0");
//! assert!(snapshot < Version::from_str("1.2.4").unwrap());
//! ```
//!
//! PEP 440 has a lot of unintuitive features the bump algorithms have to
//! respect, including:
//!
//! * An epoch that you can prefix the version with, e.g. `1!1.2.3`. Lower
//!   epoch always means lower version (`1.0 <= 2!0.1`)
//! * post versions, which can be attached to both stable releases and
//!   pre-releases
//! * dev versions, which can be attached to both stable releases and
//!   pre-releases. When attached to a pre-release the dev version is ordered
//!   just below the normal pre-release, however when attached to a stable
//!   version, the dev version is sorted before any pre-release of it
//! * local versions on top of all the others, which are added with a + and
//!   have implicitly typed string and number segments
//!
//! Every operation on [`Version`] returns a new value. Bumps advance to the
//! next release point without double-incrementing: bumping the major of
//! `1.2.3rc3` lands on `2.0.0` rather than `3.0.0` (the rc is treated as an
//! early next release), and [`Version::bump_prerelease`] never orders below
//! its input even when asked to switch to a lower prerelease kind.
#![deny(missing_docs)]

pub use crate::bump::{DevTarget, ReleasePart, Replace};
pub use crate::version::{LocalSegment, Prerelease, PrereleaseKind, Version, VersionError};

mod bump;
mod version;
