use std::cmp::{Ordering, max};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::iter;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A regex based on <https://peps.python.org/pep-0440/#appendix-b-parsing-version-strings-with-regular-expressions>,
/// without the star/specifier extensions since this crate only handles concrete versions
const VERSION_RE_INNER: &str = r"
(?:v?)                                            # <https://peps.python.org/pep-0440/#preceding-v-character>
(?:(?P<epoch>[0-9]+)!)?                           # epoch
(?P<release>[0-9]+(?:\.[0-9]+)*)                  # release segment
(?P<pre_field>                                    # pre-release
    [-_\.]?
    (?P<pre_name>(a|b|c|rc|alpha|beta|pre|preview))
    [-_\.]?
    (?P<pre>[0-9]+)?
)?
(?P<post_field>                                   # post release
    (?:-(?P<post_old>[0-9]+))
    |
    (?:
        [-_\.]?
        (?P<post_l>post|rev|r)
        [-_\.]?
        (?P<post_new>[0-9]+)?
    )
)?
(?P<dev_field>                                    # dev release
    [-_\.]?
    (?P<dev_l>dev)
    [-_\.]?
    (?P<dev>[0-9]+)?
)?
(?:\+(?P<local>[a-z0-9]+(?:[-_\.][a-z0-9]+)*))?   # local version
";

/// Matches a python version such as `1.19a1`. Based on the PEP 440 regex
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?xi)^(?:\s*){VERSION_RE_INNER}(?:\s*)$")).unwrap());

/// Parse failure: the input does not conform to the PEP 440 grammar.
///
/// All failures surface synchronously at construction time and no partial
/// value is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    /// The text is not a valid PEP 440 version
    #[error("version `{0}` doesn't match PEP 440 rules")]
    Version(String),
    /// The text is not a valid local version label
    #[error("local version label `{0}` doesn't match PEP 440 rules")]
    LocalLabel(String),
    /// The text names no prerelease kind
    #[error("`{0}` isn't recognized as alpha, beta or release candidate")]
    PrereleaseKind(String),
    /// The text names no release component
    #[error("no such release part `{0}`, must be one of major, minor, micro")]
    ReleasePart(String),
    /// The text names no anchor for a fresh dev marker
    #[error("no such dev release target `{0}`, must be one of major, minor, micro, post")]
    DevTarget(String),
}

/// The kind of a prerelease marker (alpha, beta or release candidate)
///
/// <https://peps.python.org/pep-0440/#pre-releases>
#[derive(PartialEq, Eq, Debug, Hash, Clone, Copy, Ord, PartialOrd)]
pub enum PrereleaseKind {
    /// alpha prerelease
    Alpha,
    /// beta prerelease
    Beta,
    /// release candidate prerelease
    Rc,
}

impl FromStr for PrereleaseKind {
    type Err = VersionError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind.to_lowercase().as_str() {
            "a" | "alpha" => Ok(Self::Alpha),
            "b" | "beta" => Ok(Self::Beta),
            "c" | "rc" | "pre" | "preview" => Ok(Self::Rc),
            _ => Err(VersionError::PrereleaseKind(kind.to_string())),
        }
    }
}

impl Display for PrereleaseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alpha => write!(f, "a"),
            Self::Beta => write!(f, "b"),
            Self::Rc => write!(f, "rc"),
        }
    }
}

/// A prerelease marker attached to a version, such as `a8` in `1.2.3a8`
#[derive(PartialEq, Eq, Debug, Hash, Clone, Copy, Ord, PartialOrd)]
pub struct Prerelease {
    /// Alpha, beta or release candidate
    pub kind: PrereleaseKind,
    /// The number attached to the marker; `1.2.3a` normalizes to `1.2.3a0`
    pub number: u64,
}

impl Display for Prerelease {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind, self.number)
    }
}

/// A part of the [local version identifier](<https://peps.python.org/pep-0440/#local-version-identifiers>)
///
/// Each dot-separated segment is an integer when it consists entirely of
/// ASCII digits, otherwise a case-folded string. Numeric segments compare
/// greater than string segments, which the `Ord` below encodes; the derived
/// `Ord` for `Vec<LocalSegment>` then matches the PEP 440 rules.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum LocalSegment {
    /// Not-parseable as integer segment of local version
    String(String),
    /// Inferred integer segment of local version
    Number(u64),
}

impl Display for LocalSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(string) => write!(f, "{string}"),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for LocalSegment {
    fn from(segment: &str) -> Self {
        if let Ok(number) = segment.parse::<u64>() {
            Self::Number(number)
        } else {
            // "if a segment contains any ASCII letters then that segment is
            // compared lexicographically with case insensitivity"
            Self::String(segment.to_lowercase())
        }
    }
}

impl PartialOrd for LocalSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        // <https://peps.python.org/pep-0440/#local-version-identifiers>
        match (self, other) {
            (Self::Number(n1), Self::Number(n2)) => n1.cmp(n2),
            (Self::String(s1), Self::String(s2)) => s1.cmp(s2),
            (Self::Number(_), Self::String(_)) => Ordering::Greater,
            (Self::String(_), Self::Number(_)) => Ordering::Less,
        }
    }
}

/// A PEP 440 version number such as `1.2.3` or `4!5.6.7a8.post9.dev0`.
///
/// The value is immutable: every transformation in this crate builds a new
/// `Version` rather than mutating in place, so sharing across threads needs
/// no synchronization.
///
/// Parse with [`Version::from_str`]:
///
/// ```rust
/// use std::str::FromStr;
/// use newversion::Version;
///
/// let version = Version::from_str("1.19").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    /// The [versioning epoch](https://peps.python.org/pep-0440/#version-epochs). Normally just 0,
    /// but you can increment it if you switched the versioning scheme.
    epoch: u64,
    /// The normal number part of the version
    /// (["final release"](https://peps.python.org/pep-0440/#final-releases)),
    /// such a `1.2.3` in `4!1.2.3a8.post9.dev1`
    release: Vec<u64>,
    /// The [prerelease](https://peps.python.org/pep-0440/#pre-releases), i.e. alpha, beta or rc
    /// plus a number
    pre: Option<Prerelease>,
    /// The [post release version](https://peps.python.org/pep-0440/#post-releases),
    /// higher post version are preferred over lower post or none-post versions
    post: Option<u64>,
    /// The [developmental release](https://peps.python.org/pep-0440/#developmental-releases),
    /// if any
    dev: Option<u64>,
    /// A [local version identifier](https://peps.python.org/pep-0440/#local-version-identifiers)
    /// such as `+deadbeef` in `1.2.3+deadbeef`
    local: Option<Vec<LocalSegment>>,
}

impl Version {
    /// The zero version `0.0.0`
    pub fn zero() -> Self {
        Self::from_parts(0, vec![0, 0, 0], None, None, None, None)
    }

    /// Constructor for a version that is just a release such as `3.8`
    pub fn from_release(release: Vec<u64>) -> Self {
        Self::from_parts(0, release, None, None, None, None)
    }

    /// Direct construction from components. The fields carry their invariants
    /// in their types, so no reparse round-trip is needed.
    pub(crate) fn from_parts(
        epoch: u64,
        release: Vec<u64>,
        pre: Option<Prerelease>,
        post: Option<u64>,
        dev: Option<u64>,
        local: Option<Vec<LocalSegment>>,
    ) -> Self {
        Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        }
    }

    /// Render to the canonical normalized string, same as `to_string`
    pub fn dumps(&self) -> String {
        self.to_string()
    }

    /// The versioning epoch, 0 unless explicitly set
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The release number sequence, such as `[1, 2, 3]` in `1.2.3rc4`
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// The prerelease marker, if any
    pub fn pre(&self) -> Option<Prerelease> {
        self.pre
    }

    /// The post release number, if any
    pub fn post(&self) -> Option<u64> {
        self.post
    }

    /// The dev release number, if any
    pub fn dev(&self) -> Option<u64> {
        self.dev
    }

    /// The local version segments, if any
    pub fn local(&self) -> Option<&[LocalSegment]> {
        self.local.as_deref()
    }

    /// The first item of release or 0 if unavailable.
    #[allow(clippy::get_first)]
    pub fn major(&self) -> u64 {
        self.release.get(0).copied().unwrap_or_default()
    }

    /// The second item of release or 0 if unavailable.
    pub fn minor(&self) -> u64 {
        self.release.get(1).copied().unwrap_or_default()
    }

    /// The third item of release or 0 if unavailable.
    pub fn micro(&self) -> u64 {
        self.release.get(2).copied().unwrap_or_default()
    }

    /// Whether this is an alpha/beta/rc or dev version, matching
    /// `packaging.version.Version.is_prerelease`
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    /// Whether this is a dev version
    pub fn is_devrelease(&self) -> bool {
        self.dev.is_some()
    }

    /// Whether this is a post version
    pub fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    /// Whether this is a local version (e.g. `1.2.3+localsuffixesareweird`)
    pub fn is_local(&self) -> bool {
        self.local.is_some()
    }

    /// Whether this is neither a pre- nor a dev-release. Post releases of a
    /// stable release count as stable.
    pub fn is_stable(&self) -> bool {
        !self.is_prerelease()
    }

    /// The kind of the prerelease marker, if any
    pub fn prerelease_type(&self) -> Option<PrereleaseKind> {
        self.pre.map(|pre| pre.kind)
    }
}

/// Shows normalized version
impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release = self
            .release
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join(".");
        write!(f, "{release}")?;
        if let Some(pre) = &self.pre {
            write!(f, "{pre}")?;
        }
        if let Some(post) = self.post {
            write!(f, ".post{post}")?;
        }
        if let Some(dev) = self.dev {
            write!(f, ".dev{dev}")?;
        }
        if let Some(local) = &self.local {
            let segments = local
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<String>>()
                .join(".");
            write!(f, "+{segments}")?;
        }
        Ok(())
    }
}

/// Compare the release parts of two versions, e.g. `4.3.1` > `4.2`, `1.1.0` == `1.1` and
/// `1.16` < `1.19`
pub(crate) fn compare_release(this: &[u64], other: &[u64]) -> Ordering {
    // "When comparing release segments with different numbers of components, the shorter segment
    // is padded out with additional zeros as necessary"
    for (this, other) in this.iter().chain(iter::repeat(&0)).zip(
        other
            .iter()
            .chain(iter::repeat(&0))
            .take(max(this.len(), other.len())),
    ) {
        match this.cmp(other) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
    }
    Ordering::Equal
}

/// Compare the parts attached after the release, given equal release
///
/// According to <https://peps.python.org/pep-0440/#summary-of-permitted-suffixes-and-relative-ordering>
/// the order of pre/post-releases is:
/// .devN, aN, bN, rcN, <no suffix (final)>, .postN
/// but also, you can have dev/post releases on pre-releases, so we make a three stage ordering:
/// ({dev: 0, a: 1, b: 2, rc: 3, (): 4, post: 5}, <preN>, <postN or None as smallest>, <devN or Max as largest>, <local>)
///
/// For post, any number is better than none (so None defaults below 0), but for dev, no number
/// is better (so None defaults to the maximum). For local the Option<Vec<T>> luckily already has
/// the correct default Ord implementation
fn suffix_key(version: &Version) -> (u64, u64, Option<u64>, u64, Option<&[LocalSegment]>) {
    let local = version.local.as_deref();
    match (version.pre, version.post, version.dev) {
        // dev release without pre or post ranks below everything of this release
        (None, None, Some(dev)) => (0, 0, None, dev, local),
        (Some(pre), post, dev) => {
            let stage = match pre.kind {
                PrereleaseKind::Alpha => 1,
                PrereleaseKind::Beta => 2,
                PrereleaseKind::Rc => 3,
            };
            (stage, pre.number, post, dev.unwrap_or(u64::MAX), local)
        }
        // final release
        (None, None, None) => (4, 0, None, 0, local),
        // post release, possibly with a dev rider
        (None, Some(post), dev) => (5, 0, Some(post), dev.unwrap_or(u64::MAX), local),
    }
}

impl PartialEq<Self> for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    /// Custom implementation ignoring trailing release zeros because `PartialEq` zero pads
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.epoch.hash(state);
        for part in self.release.iter().rev().skip_while(|part| **part == 0) {
            part.hash(state);
        }
        self.pre.hash(state);
        self.dev.hash(state);
        self.post.hash(state);
        self.local.hash(state);
    }
}

impl PartialOrd<Self> for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// 1.0.dev456 < 1.0a1 < 1.0a2.dev456 < 1.0a12.dev456 < 1.0a12 < 1.0b1.dev456 < 1.0b2
    /// < 1.0b2.post345.dev456 < 1.0b2.post345 < 1.0rc1.dev456 < 1.0rc1 < 1.0
    /// < 1.0.post456.dev34 < 1.0.post456
    fn cmp(&self, other: &Self) -> Ordering {
        match self.epoch.cmp(&other.epoch) {
            Ordering::Equal => {}
            ordering => return ordering,
        }

        match compare_release(&self.release, &other.release) {
            Ordering::Equal => {}
            ordering => return ordering,
        }

        // release is equal, so compare the attached parts
        suffix_key(self).cmp(&suffix_key(other))
    }
}

impl FromStr for Version {
    type Err = VersionError;

    /// Parses a version such as `1.19`, `1.0a1`, `1.0+abc.5` or `1!2012.2`
    fn from_str(version: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionError::Version(version.to_string());
        let captures = VERSION_RE.captures(version).ok_or_else(invalid)?;

        let number_field = |field_name| {
            captures
                .name(field_name)
                .map(|field| {
                    field
                        .as_str()
                        .parse::<u64>()
                        // Out of range for u64, the regex only allows digits
                        .map_err(|_| invalid())
                })
                .transpose()
        };

        // "If no explicit epoch is given, the implicit epoch is 0"
        let epoch = number_field("epoch")?.unwrap_or_default();
        let release = captures
            .name("release")
            // Can't fail, the regex requires a release
            .ok_or_else(invalid)?
            .as_str()
            .split('.')
            .map(|segment| segment.parse::<u64>().map_err(|_| invalid()))
            .collect::<Result<Vec<u64>, VersionError>>()?;
        let pre = captures
            .name("pre_name")
            .map(|name| {
                Ok(Prerelease {
                    kind: PrereleaseKind::from_str(name.as_str())?,
                    // <https://peps.python.org/pep-0440/#implicit-pre-release-number>
                    number: number_field("pre")?.unwrap_or_default(),
                })
            })
            .transpose()?;
        let post = if captures.name("post_field").is_some() {
            // Both `.post` without a number and the legacy `-N` form default to 0
            Some(
                number_field("post_new")?
                    .or(number_field("post_old")?)
                    .unwrap_or_default(),
            )
        } else {
            None
        };
        let dev = if captures.name("dev_field").is_some() {
            // <https://peps.python.org/pep-0440/#implicit-development-release-number>
            Some(number_field("dev")?.unwrap_or_default())
        } else {
            None
        };
        let local = captures.name("local").map(|local| {
            local
                .as_str()
                .split(['-', '_', '.'])
                .map(LocalSegment::from)
                .collect()
        });

        Ok(Self::from_parts(epoch, release, pre, post, dev, local))
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
