use crate::artifacts::branch::SAFE_NAME_REGEX;
use crate::errors::KeeperError;
use anyhow::Context;

fn validate_safe_name(kind: &str, name: &str) -> anyhow::Result<()> {
    if name.is_empty() {
        return Err(KeeperError::invalid_input(format!("{} name cannot be empty", kind)).into());
    }

    let re = regex::Regex::new(SAFE_NAME_REGEX)
        .with_context(|| format!("invalid safe name regex: {SAFE_NAME_REGEX}"))?;

    if re.is_match(name) {
        Ok(())
    } else {
        Err(KeeperError::invalid_input(format!(
            "invalid {} name '{}': use only letters, digits, '-' and '_'",
            kind, name
        ))
        .into())
    }
}

/// Name of a branch directory under `branches/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        validate_safe_name("branch", &name)?;
        Ok(Self(name))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a repository directory under the keeper home
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        validate_safe_name("project", &name)?;
        Ok(Self(name))
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
