use std::fmt;

use crate::boundary::BoundaryWarning;
use crate::domain::tag::{validate_tag_name, TagPattern};
use crate::domain::{BumpKind, Version};
use crate::error::{PreconditionError, Result};

pub const DEFAULT_COMMIT_MESSAGE: &str = "chore(release): bump version to {version}";

/// Orchestrator steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ReadCurrentVersion,
    ResolvePlan,
    CheckWorkingTree,
    WriteVersion,
    Commit,
    Tag,
    Push,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::ReadCurrentVersion => "read current version",
            Step::ResolvePlan => "resolve plan",
            Step::CheckWorkingTree => "check working tree",
            Step::WriteVersion => "write version",
            Step::Commit => "commit",
            Step::Tag => "tag",
            Step::Push => "push",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs that shape a plan besides the current version and bump kind
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Overrides `tag_pattern` when set
    pub tag_name: Option<String>,
    pub tag_pattern: TagPattern,
    /// Commit message template; `{version}` and `{previous}` are substituted
    pub commit_message: String,
    pub remote: String,
    pub annotated_tags: bool,
    pub require_increasing_explicit: bool,
    pub dry_run: bool,
    pub no_push: bool,
    pub no_commit: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        PlanOptions {
            tag_name: None,
            tag_pattern: TagPattern::default(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            remote: "origin".to_string(),
            annotated_tags: true,
            require_increasing_explicit: false,
            dry_run: false,
            no_push: false,
            no_commit: false,
        }
    }
}

/// Every decision of a bump, made before any side effect runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpPlan {
    from: Version,
    to: Version,
    tag_name: String,
    commit_message: String,
    remote: String,
    annotated_tag: bool,
    dry_run: bool,
    no_push: bool,
    no_commit: bool,
}

impl BumpPlan {
    /// Resolve a bump kind against the current version.
    ///
    /// Returns the plan along with any non-fatal warnings about it.
    pub fn resolve(
        current: &Version,
        kind: &BumpKind,
        options: &PlanOptions,
    ) -> Result<(BumpPlan, Vec<BoundaryWarning>)> {
        let next = current.bump(kind);
        let mut warnings = Vec::new();

        if kind.is_explicit() {
            if next <= *current {
                if options.require_increasing_explicit {
                    return Err(PreconditionError::NotIncreasing {
                        from: current.clone(),
                        to: next,
                    }
                    .into());
                }
                warnings.push(BoundaryWarning::ExplicitNotIncreasing {
                    from: current.clone(),
                    to: next.clone(),
                });
            }
        } else if current.is_prerelease() || !current.build.is_empty() {
            warnings.push(BoundaryWarning::PrereleaseDiscarded {
                from: current.clone(),
            });
        }

        let tag_name = match &options.tag_name {
            Some(name) => {
                validate_tag_name(name)?;
                name.clone()
            }
            None => options.tag_pattern.format(&next),
        };

        let commit_message = options
            .commit_message
            .replace("{version}", &next.to_string())
            .replace("{previous}", &current.to_string());

        let plan = BumpPlan {
            from: current.clone(),
            to: next,
            tag_name,
            commit_message,
            remote: options.remote.clone(),
            annotated_tag: options.annotated_tags,
            dry_run: options.dry_run,
            no_push: options.no_push,
            no_commit: options.no_commit,
        };

        Ok((plan, warnings))
    }

    pub fn from(&self) -> &Version {
        &self.from
    }

    pub fn to(&self) -> &Version {
        &self.to
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn annotated_tag(&self) -> bool {
        self.annotated_tag
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn no_push(&self) -> bool {
        self.no_push
    }

    pub fn no_commit(&self) -> bool {
        self.no_commit
    }

    /// Mutating steps this plan runs (or would run, for a dry run)
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = vec![Step::WriteVersion];
        if !self.no_commit {
            steps.push(Step::Commit);
        }
        steps.push(Step::Tag);
        if !self.no_push {
            steps.push(Step::Push);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_resolve_default_tag() {
        let (plan, warnings) =
            BumpPlan::resolve(&Version::new(0, 0, 1), &BumpKind::Patch, &PlanOptions::default())
                .unwrap();
        assert_eq!(plan.from(), &Version::new(0, 0, 1));
        assert_eq!(plan.to(), &Version::new(0, 0, 2));
        assert_eq!(plan.tag_name(), "v0.0.2");
        assert_eq!(plan.commit_message(), "chore(release): bump version to 0.0.2");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_resolve_custom_tag_does_not_affect_version() {
        let options = PlanOptions {
            tag_name: Some("release-1.0.0".to_string()),
            ..PlanOptions::default()
        };
        let (plan, _) = BumpPlan::resolve(&Version::new(0, 0, 1), &BumpKind::Patch, &options).unwrap();
        assert_eq!(plan.tag_name(), "release-1.0.0");
        assert_eq!(plan.to(), &Version::new(0, 0, 2));
    }

    #[test]
    fn test_resolve_rejects_invalid_custom_tag() {
        let options = PlanOptions {
            tag_name: Some("bad tag".to_string()),
            ..PlanOptions::default()
        };
        let err = BumpPlan::resolve(&Version::new(1, 0, 0), &BumpKind::Patch, &options).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_resolve_commit_template() {
        let options = PlanOptions {
            commit_message: "release {previous} -> {version}".to_string(),
            ..PlanOptions::default()
        };
        let (plan, _) = BumpPlan::resolve(&Version::new(1, 2, 3), &BumpKind::Major, &options).unwrap();
        assert_eq!(plan.commit_message(), "release 1.2.3 -> 2.0.0");
    }

    #[test]
    fn test_resolve_explicit_downgrade_warns_by_default() {
        let target = Version::new(1, 0, 0);
        let (plan, warnings) = BumpPlan::resolve(
            &Version::new(1, 2, 3),
            &BumpKind::Explicit(target.clone()),
            &PlanOptions::default(),
        )
        .unwrap();
        assert_eq!(plan.to(), &target);
        assert!(matches!(
            warnings.as_slice(),
            [BoundaryWarning::ExplicitNotIncreasing { .. }]
        ));
    }

    #[test]
    fn test_resolve_explicit_downgrade_rejected_when_strict() {
        let options = PlanOptions {
            require_increasing_explicit: true,
            ..PlanOptions::default()
        };
        let err = BumpPlan::resolve(
            &Version::new(1, 2, 3),
            &BumpKind::Explicit(Version::new(1, 2, 3)),
            &options,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Precondition(PreconditionError::NotIncreasing { .. })
        ));
    }

    #[test]
    fn test_resolve_prerelease_warns_when_dropped() {
        let current = Version::parse("1.0.0-rc.2").unwrap();
        let (plan, warnings) =
            BumpPlan::resolve(&current, &BumpKind::Minor, &PlanOptions::default()).unwrap();
        assert_eq!(plan.to(), &Version::new(1, 1, 0));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_steps_honor_flags() {
        let mut options = PlanOptions::default();
        let (plan, _) = BumpPlan::resolve(&Version::new(1, 0, 0), &BumpKind::Patch, &options).unwrap();
        assert_eq!(
            plan.steps(),
            vec![Step::WriteVersion, Step::Commit, Step::Tag, Step::Push]
        );

        options.no_push = true;
        options.no_commit = true;
        let (plan, _) = BumpPlan::resolve(&Version::new(1, 0, 0), &BumpKind::Patch, &options).unwrap();
        assert_eq!(plan.steps(), vec![Step::WriteVersion, Step::Tag]);
    }
}
