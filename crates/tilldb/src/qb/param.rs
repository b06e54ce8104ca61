//! Bound-parameter storage for the builders.
//!
//! A builder never interpolates values into SQL text; every value lands here
//! and is referenced by a `$n` placeholder. Placeholder numbers are the
//! 1-based position in this list, handed out at push time, so the SQL
//! fragment and its binding can never disagree.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// One bound value, shared rather than owned.
///
/// Builders are `Clone` (a filter set built once can back both a page query
/// and its count), so the value sits behind an `Arc` instead of being copied
/// per clone.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Borrow the value in the form the driver's execute methods take.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        // Narrows Arc<dyn ToSql + Send + Sync> to the driver's &(dyn ToSql + Sync).
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Param(..)")
    }
}

/// The positional parameters of one statement, in placeholder order.
#[derive(Clone, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Bind a value and return the `$n` placeholder number it was assigned.
    pub fn push<T: ToSql + Send + Sync + 'static>(&mut self, value: T) -> usize {
        self.append(Param::new(value))
    }

    /// Bind an already-wrapped [`Param`], returning its placeholder number.
    pub fn append(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The slice shape `tokio_postgres` execution methods expect.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

impl std::fmt::Debug for ParamList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamList").field("len", &self.params.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_hands_out_one_based_positions() {
        let mut params = ParamList::new();
        assert_eq!(params.push("open"), 1);
        assert_eq!(params.push(42_i64), 2);
        assert_eq!(params.append(Param::new(true)), 3);
        assert_eq!(params.len(), 3);
        assert_eq!(params.as_refs().len(), 3);
    }

    #[test]
    fn cloned_lists_share_values_but_not_growth() {
        let mut original = ParamList::new();
        original.push(7_i64);
        let mut clone = original.clone();
        clone.push("extra");
        assert_eq!(original.len(), 1);
        assert_eq!(clone.len(), 2);
    }
}
