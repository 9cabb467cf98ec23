use crate::error::InvalidPrefixError;
use quadview_model::Variable;

/// Prefix of the variables that replace blank nodes.
///
/// `~` cannot start a SPARQL variable name, hence no user variable can carry this prefix.
pub const BLANK_NODE_VARIABLE_PREFIX: &str = "~bv";

/// Prefix of the variables produced by renaming.
pub const RENAMED_VARIABLE_PREFIX: &str = "/v";

/// Allocates fresh variables `<prefix>1`, `<prefix>2`, ...
///
/// An allocator is owned by a single [SubstitutionMapping](super::SubstitutionMapping) and is
/// never shared between rewrite passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableAllocator {
    prefix: String,
    next: u64,
}

impl VariableAllocator {
    /// Creates an allocator for `prefix`.
    ///
    /// Returns an error if a generated name would also be a valid SPARQL variable name, as the
    /// allocated variables could then collide with variables of the query.
    pub fn try_new(prefix: impl Into<String>) -> Result<Self, InvalidPrefixError> {
        let prefix = prefix.into();
        if Variable::new(format!("{prefix}1")).is_ok() {
            return Err(InvalidPrefixError::UserVisible(prefix));
        }
        Ok(Self { prefix, next: 1 })
    }

    /// Creates an allocator with the [BLANK_NODE_VARIABLE_PREFIX].
    pub fn for_blank_nodes() -> Self {
        Self {
            prefix: BLANK_NODE_VARIABLE_PREFIX.to_owned(),
            next: 1,
        }
    }

    /// Creates an allocator with the [RENAMED_VARIABLE_PREFIX].
    pub fn for_renaming() -> Self {
        Self {
            prefix: RENAMED_VARIABLE_PREFIX.to_owned(),
            next: 1,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the number of variables allocated so far.
    pub fn allocated(&self) -> u64 {
        self.next - 1
    }

    /// Allocates the next variable. Each call returns a distinct variable.
    pub fn allocate(&mut self) -> Variable {
        let variable = Variable::new_unchecked(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        variable
    }
}
