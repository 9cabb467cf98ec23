use crate::error::InvalidPrefixError;
use crate::transform::{
    BLANK_NODE_VARIABLE_PREFIX, BlankNodesToVariables, RENAMED_VARIABLE_PREFIX,
    SubstitutionMapping, VariableAllocator, VariableRenamer,
};
use quadview_model::Variable;

/// Configures the variables allocated by the rewrite policies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Prefix of the variables that replace blank nodes.
    pub blank_node_prefix: String,
    /// Prefix of the variables introduced by renaming.
    pub renaming_prefix: String,
}

impl RewriteOptions {
    /// Checks that both prefixes are valid and that neither is a prefix of the other.
    pub fn validate(&self) -> Result<(), InvalidPrefixError> {
        if self.blank_node_prefix.starts_with(&self.renaming_prefix)
            || self.renaming_prefix.starts_with(&self.blank_node_prefix)
        {
            return Err(InvalidPrefixError::Overlapping {
                blank_node_prefix: self.blank_node_prefix.clone(),
                renaming_prefix: self.renaming_prefix.clone(),
            });
        }
        VariableAllocator::try_new(self.blank_node_prefix.as_str())?;
        VariableAllocator::try_new(self.renaming_prefix.as_str())?;
        Ok(())
    }

    /// Creates a fresh [BlankNodesToVariables] policy.
    pub fn blank_node_policy(&self) -> Result<BlankNodesToVariables, InvalidPrefixError> {
        let allocator = VariableAllocator::try_new(self.blank_node_prefix.as_str())?;
        Ok(BlankNodesToVariables::with_allocator(allocator))
    }

    /// Creates a fresh [VariableRenamer] policy that keeps `protected`.
    pub fn renaming_policy(
        &self,
        protected: impl IntoIterator<Item = Variable>,
    ) -> Result<VariableRenamer, InvalidPrefixError> {
        let allocator = VariableAllocator::try_new(self.renaming_prefix.as_str())?;
        Ok(VariableRenamer::with_mapping(
            protected,
            SubstitutionMapping::new(allocator),
        ))
    }
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            blank_node_prefix: BLANK_NODE_VARIABLE_PREFIX.to_owned(),
            renaming_prefix: RENAMED_VARIABLE_PREFIX.to_owned(),
        }
    }
}
