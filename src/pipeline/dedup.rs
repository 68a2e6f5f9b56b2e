use super::Pipeline;
use super::types::KeepStrategy;
use crate::error::Result;
use polars::prelude::UniqueKeepStrategy;

impl KeepStrategy {
    fn to_polars(self) -> UniqueKeepStrategy {
        match self {
            Self::First => UniqueKeepStrategy::First,
            Self::Last => UniqueKeepStrategy::Last,
            Self::None => UniqueKeepStrategy::None,
        }
    }
}

impl Pipeline {
    /// Removes duplicated rows, comparing only `subset` when given (an empty
    /// subset compares every column).
    ///
    /// Surviving rows keep their relative order. Nulls compare equal to each
    /// other.
    pub fn drop_duplicates(
        &mut self,
        subset: Option<&[&str]>,
        keep: KeepStrategy,
    ) -> Result<&mut Self> {
        let subset = match subset {
            Some(_) => Some(self.resolve_columns(subset)?),
            None => None,
        };

        let df = self.dataframe();
        let before = df.height();
        let df = if df.width() == 0 {
            df.clone()
        } else {
            df.unique_stable(subset.as_deref(), keep.to_polars(), None)?
        };

        let removed = before - df.height();
        let noun = if removed == 1 { "row" } else { "rows" };
        Ok(self.commit(df, format!("{removed} duplicate {noun} removed")))
    }
}
