//! Deriving "next" versions: release, prerelease, post and dev bumps plus a
//! surgical `replace` setter.
//!
//! Every operation here is a pure function from a [`Version`] and its
//! arguments to a brand-new [`Version`]; nothing is ever mutated in place.
//! The bump operations advance to a clean target state and clear the facets
//! that are not part of it, while [`Version::replace`] preserves everything
//! it is not told to change.

use std::cmp::max;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "tracing")]
use tracing::warn;

use crate::version::{LocalSegment, Prerelease, PrereleaseKind, Version, VersionError};

/// The release component targeted by the numeric bump operations
#[derive(PartialEq, Eq, Debug, Hash, Clone, Copy, Default)]
pub enum ReleasePart {
    /// The first release component
    Major,
    /// The second release component
    Minor,
    /// The third release component
    #[default]
    Micro,
}

impl FromStr for ReleasePart {
    type Err = VersionError;

    fn from_str(part: &str) -> Result<Self, Self::Err> {
        match part.to_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "micro" | "patch" => Ok(Self::Micro),
            _ => Err(VersionError::ReleasePart(part.to_string())),
        }
    }
}

impl Display for ReleasePart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Micro => write!(f, "micro"),
        }
    }
}

/// Where [`Version::bump_dev`] anchors a fresh dev marker when the version
/// has none yet
#[derive(PartialEq, Eq, Debug, Hash, Clone, Copy)]
pub enum DevTarget {
    /// Bump the given release component, then attach the dev marker
    Release(ReleasePart),
    /// Advance to the next post release, then attach the dev marker
    Post,
}

impl Default for DevTarget {
    fn default() -> Self {
        Self::Release(ReleasePart::Micro)
    }
}

impl FromStr for DevTarget {
    type Err = VersionError;

    fn from_str(target: &str) -> Result<Self, Self::Err> {
        if target.eq_ignore_ascii_case("post") {
            Ok(Self::Post)
        } else {
            ReleasePart::from_str(target)
                .map(Self::Release)
                .map_err(|_| VersionError::DevTarget(target.to_string()))
        }
    }
}

impl Display for DevTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Release(part) => write!(f, "{part}"),
            Self::Post => write!(f, "post"),
        }
    }
}

/// Facet overrides for [`Version::replace`], one optional field per facet.
///
/// Call sites fill in the fields they want changed and default the rest:
///
/// ```rust
/// use std::str::FromStr;
/// use newversion::{Replace, Version};
///
/// let version = Version::from_str("1.2.3").unwrap();
/// let next = version.replace(Replace {
///     dev: Some(24),
///     ..Replace::default()
/// }).unwrap();
/// assert_eq!(next.to_string(), "1.2.3.dev24");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Replace {
    /// First release component
    pub major: Option<u64>,
    /// Second release component
    pub minor: Option<u64>,
    /// Third release component
    pub micro: Option<u64>,
    /// Set the prerelease marker to alpha with this number
    pub alpha: Option<u64>,
    /// Set the prerelease marker to beta with this number
    pub beta: Option<u64>,
    /// Set the prerelease marker to rc with this number
    pub rc: Option<u64>,
    /// Dev release number
    pub dev: Option<u64>,
    /// Post release number
    pub post: Option<u64>,
    /// Versioning epoch
    pub epoch: Option<u64>,
    /// Local version label, alphanumeric segments separated by `.`, `-` or `_`
    pub local: Option<String>,
}

impl Version {
    /// Strip pre/post/dev/local, keeping epoch 0 and `major.minor.micro`.
    ///
    /// Idempotent. Never decreases the release triple, though it may decrease
    /// the full version when called on a post release.
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use newversion::Version;
    ///
    /// assert_eq!(Version::from_str("2.1.0a2").unwrap().get_stable().to_string(), "2.1.0");
    /// assert_eq!(Version::from_str("1.2.5.post3").unwrap().get_stable().to_string(), "1.2.5");
    /// ```
    pub fn get_stable(&self) -> Self {
        Self::from_parts(
            0,
            vec![self.major(), self.minor(), self.micro()],
            None,
            None,
            None,
            None,
        )
    }

    /// Get the next release version, dispatching on `part`.
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use newversion::{ReleasePart, Version};
    ///
    /// let version = Version::from_str("1.2.3.dev14").unwrap();
    /// assert_eq!(version.bump_release(ReleasePart::Minor, 2).to_string(), "1.4.0");
    /// ```
    pub fn bump_release(&self, part: ReleasePart, inc: u64) -> Self {
        match part {
            ReleasePart::Major => self.bump_major(inc),
            ReleasePart::Minor => self.bump_minor(inc),
            ReleasePart::Micro => self.bump_micro(inc),
        }
    }

    /// Get the next major version, clearing all other facets.
    ///
    /// A pre- or dev-release of `X.0.0` counts as an early `X.0.0`, so
    /// bumping it spends one increment on stabilizing:
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use newversion::Version;
    ///
    /// assert_eq!(Version::from_str("1.2.3").unwrap().bump_major(1).to_string(), "2.0.0");
    /// assert_eq!(Version::from_str("1.2.3rc3").unwrap().bump_major(2).to_string(), "3.0.0");
    /// assert_eq!(Version::from_str("2.0.0rc3").unwrap().bump_major(1).to_string(), "2.0.0");
    /// ```
    pub fn bump_major(&self, inc: u64) -> Self {
        if self.is_prerelease() && self.minor() == 0 && self.micro() == 0 {
            return self.get_stable().bump_major(inc.saturating_sub(1));
        }
        Self::from_parts(
            0,
            vec![self.major().saturating_add(inc), 0, 0],
            None,
            None,
            None,
            None,
        )
    }

    /// Get the next minor version, clearing all other facets.
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use newversion::Version;
    ///
    /// assert_eq!(Version::from_str("1.2.3").unwrap().bump_minor(1).to_string(), "1.3.0");
    /// assert_eq!(Version::from_str("1.3.0rc3").unwrap().bump_minor(1).to_string(), "1.3.0");
    /// assert_eq!(Version::from_str("1.3.0rc3").unwrap().bump_minor(2).to_string(), "1.4.0");
    /// ```
    pub fn bump_minor(&self, inc: u64) -> Self {
        if self.is_prerelease() && self.micro() == 0 {
            return self.get_stable().bump_minor(inc.saturating_sub(1));
        }
        Self::from_parts(
            0,
            vec![self.major(), self.minor().saturating_add(inc), 0],
            None,
            None,
            None,
            None,
        )
    }

    /// Get the next micro version, clearing all other facets.
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use newversion::Version;
    ///
    /// assert_eq!(Version::from_str("1.2.3").unwrap().bump_micro(1).to_string(), "1.2.4");
    /// assert_eq!(Version::from_str("1.2.3a5").unwrap().bump_micro(1).to_string(), "1.2.3");
    /// ```
    pub fn bump_micro(&self, inc: u64) -> Self {
        if self.is_prerelease() {
            return self.get_stable().bump_micro(inc.saturating_sub(1));
        }
        Self::from_parts(
            0,
            vec![self.major(), self.minor(), self.micro().saturating_add(inc)],
            None,
            None,
            None,
            None,
        )
    }

    /// Get the next dev version.
    ///
    /// A dev marker means "`N` steps before the next meaningful release
    /// point". An existing dev number is advanced in place; otherwise the
    /// next release point is derived first (the targeted release component
    /// for stable versions, the next post release for post releases or
    /// `DevTarget::Post`, the version itself for pre-releases) and a fresh
    /// marker starts at `dev0` for `inc == 1`.
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use newversion::{DevTarget, Version};
    ///
    /// let target = DevTarget::default();
    /// assert_eq!(Version::from_str("1.2.3").unwrap().bump_dev(1, target).to_string(), "1.2.4.dev0");
    /// assert_eq!(Version::from_str("1.2.3.dev14").unwrap().bump_dev(1, target).to_string(), "1.2.3.dev15");
    /// assert_eq!(Version::from_str("1.2.3.post4").unwrap().bump_dev(1, target).to_string(), "1.2.3.post5.dev0");
    /// ```
    pub fn bump_dev(&self, inc: u64, target: DevTarget) -> Self {
        if let Some(dev) = self.dev() {
            // Already a dev release, advance the number and keep the rest
            return self.with_dev(dev.saturating_add(inc));
        }

        let fresh = inc.saturating_sub(1);
        match target {
            // A post release is the next release point, requested or current
            DevTarget::Post => self.bump_postrelease(1).with_dev(fresh),
            DevTarget::Release(_) if self.is_postrelease() => {
                self.bump_postrelease(1).with_dev(fresh)
            }
            DevTarget::Release(part) if self.is_stable() => {
                self.bump_release(part, 1).with_dev(fresh)
            }
            // Pre-release: the dev marker rides on the existing pre
            DevTarget::Release(_) => self.with_dev(fresh),
        }
    }

    /// Set the dev number, keeping every other facet. Like [`Version::replace`]
    /// the release sequence is rebuilt as a triple.
    fn with_dev(&self, dev: u64) -> Self {
        Self::from_parts(
            self.epoch(),
            vec![self.major(), self.minor(), self.micro()],
            self.pre(),
            self.post(),
            Some(dev),
            self.local().map(<[LocalSegment]>::to_vec),
        )
    }

    /// Get the next prerelease version.
    ///
    /// The kind is the explicit `kind` argument, else the current one, else
    /// `rc`. An existing prerelease number is continued with
    /// `max(current, 1) + inc`; switching kinds restarts the counter at
    /// `inc`. When the requested kind would order below the current version
    /// (e.g. asking for beta on an rc), the kind is forced to `rc`, and if
    /// even that is not enough (stable or post versions have no prerelease
    /// to continue), the `part` release component is bumped on the
    /// stabilized version. The result is therefore never below `self`.
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use newversion::{PrereleaseKind, ReleasePart, Version};
    ///
    /// let micro = ReleasePart::Micro;
    /// assert_eq!(
    ///     Version::from_str("1.2.3").unwrap().bump_prerelease(1, None, micro).to_string(),
    ///     "1.2.4rc1"
    /// );
    /// assert_eq!(
    ///     Version::from_str("1.2.3a5").unwrap().bump_prerelease(1, None, micro).to_string(),
    ///     "1.2.3a6"
    /// );
    /// assert_eq!(
    ///     Version::from_str("1.2.3rc3")
    ///         .unwrap()
    ///         .bump_prerelease(2, Some(PrereleaseKind::Beta), micro)
    ///         .to_string(),
    ///     "1.2.3rc5"
    /// );
    /// ```
    pub fn bump_prerelease(
        &self,
        inc: u64,
        kind: Option<PrereleaseKind>,
        part: ReleasePart,
    ) -> Self {
        let mut resolved = kind
            .or(self.prerelease_type())
            .unwrap_or(PrereleaseKind::Rc);
        let mut number = match self.pre() {
            Some(pre) => max(pre.number, 1).saturating_add(inc),
            None => inc,
        };
        let mut release = self.release().to_vec();

        let candidate = |release: Vec<u64>, kind, number| {
            Self::from_parts(
                self.epoch(),
                release,
                Some(Prerelease { kind, number }),
                None,
                None,
                None,
            )
        };

        if &candidate(release.clone(), resolved, number) < self {
            // The requested kind would go backward, retry with the highest
            resolved = PrereleaseKind::Rc;
            if self.prerelease_type() != Some(resolved) {
                number = inc;
            }
            if &candidate(release.clone(), resolved, number) < self {
                // No prerelease continues this version, open the next release
                release = self.get_stable().bump_release(part, 1).release().to_vec();
            }
        } else if self.prerelease_type() != Some(resolved) {
            // A kind switch restarts the counter
            number = inc;
        }

        Self::from_parts(
            0,
            release,
            Some(Prerelease {
                kind: resolved,
                number,
            }),
            None,
            None,
            None,
        )
    }

    /// Get the next post release version. The release sequence stays as is,
    /// pre/dev/local are cleared.
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use newversion::Version;
    ///
    /// assert_eq!(Version::from_str("1.2.3").unwrap().bump_postrelease(1).to_string(), "1.2.3.post1");
    /// assert_eq!(Version::from_str("1.2.3.post4").unwrap().bump_postrelease(2).to_string(), "1.2.3.post6");
    /// ```
    pub fn bump_postrelease(&self, inc: u64) -> Self {
        let post = match self.post() {
            Some(current) => max(current, 1).saturating_add(inc),
            None => max(inc, 1),
        };
        Self::from_parts(0, self.release().to_vec(), None, Some(post), None, None)
    }

    /// Modify version facets, preserving everything not given.
    ///
    /// Unlike the bump operations this is a surgical setter: facets that are
    /// neither passed nor implied stay as they are. The release sequence is
    /// rebuilt as a `major.minor.micro` triple from the given components and
    /// the current values.
    ///
    /// At most one of `alpha`, `beta` and `rc` should be given; if several
    /// are, they are applied in that fixed order, so the highest-ranked kind
    /// supplied wins.
    ///
    /// A `local` label must consist of alphanumeric segments separated by
    /// `.`, `-` or `_`, anything else fails with [`VersionError`] rather
    /// than building a version that can't be rendered and reparsed.
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use newversion::{Replace, Version};
    ///
    /// let version = Version::from_str("1.2.3rc5").unwrap();
    /// let next = version.replace(Replace {
    ///     minor: Some(4),
    ///     ..Replace::default()
    /// }).unwrap();
    /// assert_eq!(next.to_string(), "1.4.3rc5");
    ///
    /// assert!(version.replace(Replace {
    ///     local: Some("not a label".to_string()),
    ///     ..Replace::default()
    /// }).is_err());
    /// ```
    pub fn replace(&self, changes: Replace) -> Result<Self, VersionError> {
        #[cfg(feature = "tracing")]
        {
            let given = [&changes.alpha, &changes.beta, &changes.rc]
                .iter()
                .filter(|number| number.is_some())
                .count();
            if given > 1 {
                warn!("Conflicting prerelease kinds given to `replace`, the highest wins");
            }
        }

        let release = vec![
            changes.major.unwrap_or(self.major()),
            changes.minor.unwrap_or(self.minor()),
            changes.micro.unwrap_or(self.micro()),
        ];
        let mut pre = self.pre();
        for (kind, number) in [
            (PrereleaseKind::Alpha, changes.alpha),
            (PrereleaseKind::Beta, changes.beta),
            (PrereleaseKind::Rc, changes.rc),
        ] {
            if let Some(number) = number {
                pre = Some(Prerelease { kind, number });
            }
        }
        let local = match changes.local {
            Some(label) => {
                let segments: Vec<&str> = label.split(['-', '_', '.']).collect();
                if segments.iter().any(|segment| {
                    segment.is_empty() || !segment.chars().all(|c| c.is_ascii_alphanumeric())
                }) {
                    return Err(VersionError::LocalLabel(label));
                }
                Some(segments.into_iter().map(LocalSegment::from).collect())
            }
            None => self.local().map(<[LocalSegment]>::to_vec),
        };

        Ok(Self::from_parts(
            changes.epoch.unwrap_or(self.epoch()),
            release,
            pre,
            changes.post.or(self.post()),
            changes.dev.or(self.dev()),
            local,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::version::{PrereleaseKind, Version};

    use super::{DevTarget, Replace, ReleasePart};

    fn version(text: &str) -> Version {
        Version::from_str(text).unwrap()
    }

    #[test]
    fn stability_queries() {
        let cases = [
            // (version, is_stable, is_prerelease, is_postrelease, is_devrelease)
            ("1.2.3", true, false, false, false),
            ("1.2.3a5", false, true, false, false),
            ("1.2.3.dev14", false, true, false, true),
            ("1.2.3rc1.dev0", false, true, false, true),
            ("1.2.3.post4", true, false, true, false),
            ("1.2.3.post4.dev2", false, true, true, true),
        ];
        for (text, stable, pre, post, dev) in cases {
            let version = version(text);
            assert_eq!(version.is_stable(), stable, "{text}");
            assert_eq!(version.is_prerelease(), pre, "{text}");
            assert_eq!(version.is_postrelease(), post, "{text}");
            assert_eq!(version.is_devrelease(), dev, "{text}");
        }
    }

    #[test]
    fn prerelease_type_mapping() {
        assert_eq!(
            version("1.2.3a1").prerelease_type(),
            Some(PrereleaseKind::Alpha)
        );
        assert_eq!(
            version("1.2.3beta2").prerelease_type(),
            Some(PrereleaseKind::Beta)
        );
        assert_eq!(
            version("1.2.3rc3").prerelease_type(),
            Some(PrereleaseKind::Rc)
        );
        assert_eq!(version("1.2.3").prerelease_type(), None);
        assert_eq!(version("1.2.3.dev1").prerelease_type(), None);
    }

    #[test]
    fn get_stable() {
        let cases = [
            ("1.2.3", "1.2.3"),
            ("2.1.0a2", "2.1.0"),
            ("1.2.5.post3", "1.2.5"),
            ("1!1.2.3rc1.dev2+abc", "1.2.3"),
            ("1.2", "1.2.0"),
        ];
        for (text, expected) in cases {
            assert_eq!(version(text).get_stable().to_string(), expected, "{text}");
            // Idempotent
            assert_eq!(
                version(text).get_stable().get_stable(),
                version(text).get_stable(),
                "{text}"
            );
        }
    }

    #[test]
    fn bump_major() {
        let cases = [
            ("1.2.3", 1, "2.0.0"),
            ("1.2.3.dev14", 1, "2.0.0"),
            ("1.2.3a5", 1, "2.0.0"),
            ("1.2.3rc3", 2, "3.0.0"),
            ("1.2.3rc3", 0, "1.0.0"),
            // rc of 2.0.0 already is an early 2.0.0
            ("2.0.0rc3", 1, "2.0.0"),
            ("2.0.0rc3", 2, "3.0.0"),
            ("2.0.0.dev5", 1, "2.0.0"),
            ("1.2.3.post4", 1, "2.0.0"),
            ("1!1.2.3+abc", 1, "2.0.0"),
        ];
        for (text, inc, expected) in cases {
            assert_eq!(version(text).bump_major(inc).to_string(), expected, "{text}");
        }
    }

    #[test]
    fn bump_minor() {
        let cases = [
            ("1.2.3", 1, "1.3.0"),
            ("1.2.3.dev14", 1, "1.3.0"),
            ("1.2.3a5", 1, "1.3.0"),
            ("1.2.3rc3", 2, "1.4.0"),
            ("1.2.3rc3", 0, "1.2.0"),
            ("1.3.0rc3", 1, "1.3.0"),
            ("1.3.0rc3", 2, "1.4.0"),
            ("1.2.3.post4", 1, "1.3.0"),
        ];
        for (text, inc, expected) in cases {
            assert_eq!(version(text).bump_minor(inc).to_string(), expected, "{text}");
        }
    }

    #[test]
    fn bump_micro() {
        let cases = [
            ("1.2.3", 1, "1.2.4"),
            ("1.2.3.dev14", 1, "1.2.3"),
            ("1.2.3a5", 1, "1.2.3"),
            ("1.2.3rc3", 2, "1.2.4"),
            ("1.2.3rc3", 0, "1.2.3"),
            ("1.2.3.post4", 1, "1.2.4"),
        ];
        for (text, inc, expected) in cases {
            assert_eq!(version(text).bump_micro(inc).to_string(), expected, "{text}");
        }
    }

    #[test]
    fn bump_release_dispatch() {
        let version = version("1.2.3");
        assert_eq!(
            version.bump_release(ReleasePart::Major, 1).to_string(),
            "2.0.0"
        );
        assert_eq!(
            version.bump_release(ReleasePart::Minor, 1).to_string(),
            "1.3.0"
        );
        assert_eq!(
            version.bump_release(ReleasePart::Micro, 1).to_string(),
            "1.2.4"
        );
        assert_eq!(ReleasePart::default(), ReleasePart::Micro);
    }

    #[test]
    fn bump_dev() {
        let micro = DevTarget::default();
        let cases = [
            ("1.2.3", 1, micro, "1.2.4.dev0"),
            ("1.2.3", 1, DevTarget::Release(ReleasePart::Minor), "1.3.0.dev0"),
            ("1.2.3", 1, DevTarget::Release(ReleasePart::Major), "2.0.0.dev0"),
            ("1.2.3.dev14", 1, micro, "1.2.3.dev15"),
            ("1.2.3.dev3", 2, micro, "1.2.3.dev5"),
            ("1.2.3a4", 1, micro, "1.2.3a4.dev0"),
            ("1.2.3b5.dev9", 1, micro, "1.2.3b5.dev10"),
            ("1.2.3.post4", 1, micro, "1.2.3.post5.dev0"),
            ("1.2.3", 1, DevTarget::Post, "1.2.3.post1.dev0"),
            ("1.2.3", 3, micro, "1.2.4.dev2"),
        ];
        for (text, inc, target, expected) in cases {
            assert_eq!(
                version(text).bump_dev(inc, target).to_string(),
                expected,
                "{text}"
            );
        }
    }

    #[test]
    fn bump_dev_keeps_untargeted_facets() {
        // Advancing an existing dev number is surgical
        assert_eq!(
            version("1.2.3rc1.dev5+abc")
                .bump_dev(1, DevTarget::default())
                .to_string(),
            "1.2.3rc1.dev6+abc"
        );
        // A fresh marker on a pre-release rides on the existing pre and
        // therefore orders just below it
        let snapshot = version("1.2.3a4+abc").bump_dev(1, DevTarget::default());
        assert_eq!(snapshot.to_string(), "1.2.3a4.dev0+abc");
        assert!(snapshot < version("1.2.3a4"));
    }

    #[test]
    fn bump_prerelease() {
        let micro = ReleasePart::Micro;
        let cases = [
            ("1.2.3", 1, None, micro, "1.2.4rc1"),
            ("1.2.3.dev14", 1, None, micro, "1.2.3rc1"),
            ("1.2.3a5", 1, None, micro, "1.2.3a6"),
            // Requested kind ranks below the current one: forced to rc, the
            // accumulated counter survives because the kind does not switch
            ("1.2.3rc3", 2, Some(PrereleaseKind::Beta), micro, "1.2.3rc5"),
            ("1.2.3b2", 1, Some(PrereleaseKind::Alpha), micro, "1.2.3rc1"),
            // Upward kind switch restarts the counter
            ("1.2.3a5", 1, Some(PrereleaseKind::Rc), micro, "1.2.3rc1"),
            ("1.2.3a5", 1, Some(PrereleaseKind::Beta), micro, "1.2.3b1"),
            // Stable and post versions have no prerelease to continue
            ("1.2.3.post4", 1, None, micro, "1.2.4rc1"),
            ("1.2.3", 2, Some(PrereleaseKind::Alpha), micro, "1.2.4rc2"),
        ];
        for (text, inc, kind, part, expected) in cases {
            assert_eq!(
                version(text).bump_prerelease(inc, kind, part).to_string(),
                expected,
                "{text}"
            );
        }
        assert_eq!(
            version("1.2.3")
                .bump_prerelease(1, None, ReleasePart::Major)
                .to_string(),
            "2.0.0rc1"
        );
    }

    #[test]
    fn bump_prerelease_continues_implicit_zero() {
        // An implicit pre number counts as at least 1 when continued
        assert_eq!(
            version("1.2.3a").bump_prerelease(1, None, ReleasePart::Micro).to_string(),
            "1.2.3a2"
        );
    }

    #[test]
    fn bump_postrelease() {
        let cases = [
            ("1.2.3", 1, "1.2.3.post1"),
            ("1.2.3.post3", 1, "1.2.3.post4"),
            ("1.2.3a5", 1, "1.2.3.post1"),
            ("1.2.3.post4", 2, "1.2.3.post6"),
            // A fresh post release starts at 1 even for inc 0
            ("1.2.3", 0, "1.2.3.post1"),
            ("1.2.3.post0", 1, "1.2.3.post2"),
            // Longer release sequences survive untouched
            ("1.2.3.4", 1, "1.2.3.4.post1"),
            ("1!1.2.3.dev5+abc", 1, "1.2.3.post1"),
        ];
        for (text, inc, expected) in cases {
            assert_eq!(
                version(text).bump_postrelease(inc).to_string(),
                expected,
                "{text}"
            );
        }
    }

    #[test]
    fn bumps_are_monotonic() {
        let versions = [
            "1.2.3",
            "1.2.3a5",
            "1.2.3b1",
            "1.2.3rc3",
            "1.2.3.dev14",
            "1.2.3rc1.dev5",
            "1.2.3.post4",
            "2.0.0rc1",
            "0.0.0",
        ];
        for text in versions {
            let original = version(text);
            assert!(original.bump_major(1) > original, "major {text}");
            assert!(original.bump_minor(1) > original, "minor {text}");
            assert!(original.bump_micro(1) > original, "micro {text}");
            assert!(
                original.bump_postrelease(1) > original,
                "postrelease {text}"
            );
            // A fresh dev marker on a pre-release lands just below it per
            // the PEP 440 ordering, every other state moves forward
            if original.pre().is_none() || original.dev().is_some() {
                assert!(
                    original.bump_dev(1, DevTarget::default()) > original,
                    "dev {text}"
                );
            }
            for kind in [
                None,
                Some(PrereleaseKind::Alpha),
                Some(PrereleaseKind::Beta),
                Some(PrereleaseKind::Rc),
            ] {
                assert!(
                    original.bump_prerelease(1, kind, ReleasePart::Micro) > original,
                    "prerelease {kind:?} {text}"
                );
            }
        }
    }

    #[test]
    fn release_bumps_on_post_dev_stabilize() {
        // A dev marker on a post release is "before the next post", so the
        // release-component bumps stabilize through it; micro lands back on
        // the release triple, which orders below the post release itself
        let original = version("1.2.3.post4.dev2");
        assert_eq!(original.bump_micro(1).to_string(), "1.2.3");
        assert_eq!(original.bump_minor(1).to_string(), "1.3.0");
        assert_eq!(original.bump_major(1).to_string(), "2.0.0");
        assert!(original.bump_dev(1, DevTarget::default()) > original);
        assert!(original.bump_postrelease(1) > original);
        assert!(original.bump_prerelease(1, None, ReleasePart::Micro) > original);
    }

    #[test]
    fn replace_is_surgical() {
        // Untouched facets are preserved
        assert_eq!(
            version("1.2.3rc5")
                .replace(Replace {
                    minor: Some(4),
                    ..Replace::default()
                })
                .unwrap()
                .to_string(),
            "1.4.3rc5"
        );
        assert_eq!(
            version("1.2.3")
                .replace(Replace {
                    dev: Some(24),
                    ..Replace::default()
                })
                .unwrap()
                .to_string(),
            "1.2.3.dev24"
        );
        assert_eq!(
            version("1!1.2.3rc5.post2.dev3+abc")
                .replace(Replace {
                    micro: Some(9),
                    ..Replace::default()
                })
                .unwrap()
                .to_string(),
            "1!1.2.9rc5.post2.dev3+abc"
        );
    }

    #[test]
    fn replace_sets_each_facet() {
        let base = version("1.2.3");
        assert_eq!(
            base.replace(Replace {
                alpha: Some(2),
                ..Replace::default()
            })
            .unwrap()
            .to_string(),
            "1.2.3a2"
        );
        assert_eq!(
            base.replace(Replace {
                beta: Some(2),
                ..Replace::default()
            })
            .unwrap()
            .to_string(),
            "1.2.3b2"
        );
        assert_eq!(
            base.replace(Replace {
                rc: Some(2),
                ..Replace::default()
            })
            .unwrap()
            .to_string(),
            "1.2.3rc2"
        );
        assert_eq!(
            base.replace(Replace {
                post: Some(7),
                ..Replace::default()
            })
            .unwrap()
            .to_string(),
            "1.2.3.post7"
        );
        assert_eq!(
            base.replace(Replace {
                epoch: Some(2),
                ..Replace::default()
            })
            .unwrap()
            .to_string(),
            "2!1.2.3"
        );
        assert_eq!(
            base.replace(Replace {
                local: Some("Build-7".to_string()),
                ..Replace::default()
            })
            .unwrap()
            .to_string(),
            "1.2.3+build.7"
        );
        assert_eq!(
            base.replace(Replace {
                major: Some(3),
                minor: Some(0),
                micro: Some(0),
                ..Replace::default()
            })
            .unwrap()
            .to_string(),
            "3.0.0"
        );
    }

    #[test]
    fn replace_conflicting_prerelease_kinds() {
        // Fixed priority: alpha, then beta, then rc is applied last and wins
        assert_eq!(
            version("1.2.3")
                .replace(Replace {
                    alpha: Some(1),
                    rc: Some(2),
                    ..Replace::default()
                })
                .unwrap()
                .to_string(),
            "1.2.3rc2"
        );
        assert_eq!(
            version("1.2.3")
                .replace(Replace {
                    alpha: Some(1),
                    beta: Some(4),
                    ..Replace::default()
                })
                .unwrap()
                .to_string(),
            "1.2.3b4"
        );
        // An existing marker is overwritten by any supplied kind
        assert_eq!(
            version("1.2.3rc9")
                .replace(Replace {
                    alpha: Some(1),
                    ..Replace::default()
                })
                .unwrap()
                .to_string(),
            "1.2.3a1"
        );
    }

    #[test]
    fn replace_truncates_long_releases() {
        // The release sequence is rebuilt as a triple
        assert_eq!(
            version("1.2.3.4")
                .replace(Replace {
                    micro: Some(9),
                    ..Replace::default()
                })
                .unwrap()
                .to_string(),
            "1.2.9"
        );
    }

    #[test]
    fn replace_rejects_invalid_local() {
        let base = version("1.2.3");
        for label in ["foo bar", "", "abc..def", "x+y", "_x", "a/b"] {
            let err = base
                .replace(Replace {
                    local: Some(label.to_string()),
                    ..Replace::default()
                })
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("local version label `{label}` doesn't match PEP 440 rules")
            );
        }
        // A valid label round-trips through the canonical rendering
        let replaced = base
            .replace(Replace {
                local: Some("Build-7".to_string()),
                ..Replace::default()
            })
            .unwrap();
        assert_eq!(replaced.to_string(), "1.2.3+build.7");
        assert_eq!(version(&replaced.to_string()), replaced);
    }

    #[test]
    fn bumps_saturate_at_u64_max() {
        let max = u64::MAX;
        assert_eq!(
            version(&format!("{max}.0.0")).bump_major(1).to_string(),
            format!("{max}.0.0")
        );
        assert_eq!(
            version(&format!("1.{max}.3")).bump_minor(1).to_string(),
            format!("1.{max}.0")
        );
        assert_eq!(
            version(&format!("1.2.{max}")).bump_micro(1).to_string(),
            format!("1.2.{max}")
        );
        assert_eq!(
            version(&format!("1.2.3.post{max}"))
                .bump_postrelease(1)
                .to_string(),
            format!("1.2.3.post{max}")
        );
        assert_eq!(
            version(&format!("1.2.3a{max}"))
                .bump_prerelease(1, None, ReleasePart::Micro)
                .to_string(),
            format!("1.2.3a{max}")
        );
        assert_eq!(
            version(&format!("1.2.3.dev{max}"))
                .bump_dev(1, DevTarget::default())
                .to_string(),
            format!("1.2.3.dev{max}")
        );
    }

    #[test]
    fn copies_share_nothing() {
        let original = version("1.2.3rc1");
        let copy = original.clone();
        let bumped = copy.bump_major(1);
        assert_eq!(original, copy);
        assert_eq!(original.to_string(), "1.2.3rc1");
        assert_eq!(bumped.to_string(), "2.0.0");
    }

    #[test]
    fn selector_parsing() {
        assert_eq!(ReleasePart::from_str("major").unwrap(), ReleasePart::Major);
        assert_eq!(ReleasePart::from_str("MINOR").unwrap(), ReleasePart::Minor);
        assert_eq!(ReleasePart::from_str("patch").unwrap(), ReleasePart::Micro);
        assert_eq!(
            ReleasePart::from_str("epoch").unwrap_err().to_string(),
            "no such release part `epoch`, must be one of major, minor, micro"
        );
        assert_eq!(DevTarget::from_str("post").unwrap(), DevTarget::Post);
        assert_eq!(
            DevTarget::from_str("epoch").unwrap_err().to_string(),
            "no such dev release target `epoch`, must be one of major, minor, micro, post"
        );
        assert_eq!(
            DevTarget::from_str("minor").unwrap(),
            DevTarget::Release(ReleasePart::Minor)
        );
        assert_eq!(ReleasePart::Major.to_string(), "major");
        assert_eq!(DevTarget::Post.to_string(), "post");
    }
}
