//! Train/test partitioning by an external list of employee IDs.

use crate::error::Result;
use polars::prelude::*;
use tenure::schema;

/// Partition a frame by `Emp_ID` membership in `test_ids`.
///
/// Returns `(train, test)`: rows whose ID is absent from the list, and
/// rows whose ID is present. The two frames are disjoint and their
/// union is the input.
pub fn split_by_ids(df: &DataFrame, test_ids: &[i64]) -> Result<(DataFrame, DataFrame)> {
    let ids = Series::new("test_ids".into(), test_ids.to_vec());
    let is_test = col(schema::EMP_ID).is_in(lit(ids));

    let train = df.clone().lazy().filter(is_test.clone().not()).collect()?;
    let test = df.clone().lazy().filter(is_test).collect()?;

    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, raw_frame};

    fn sample() -> DataFrame {
        raw_frame(&[
            (1, date(2017, 1, 1), date(2016, 1, 1), None, 1.0, 0.0),
            (2, date(2017, 1, 1), date(2016, 1, 1), None, 1.0, 0.0),
            (2, date(2017, 2, 1), date(2016, 1, 1), None, 1.0, 0.0),
            (3, date(2017, 1, 1), date(2016, 1, 1), None, 1.0, 0.0),
        ])
    }

    #[test]
    fn test_split_is_disjoint_and_complete() {
        let df = sample();
        let (train, test) = split_by_ids(&df, &[2]).unwrap();

        assert_eq!(train.height() + test.height(), df.height());
        assert_eq!(test.height(), 2);

        let train_ids: Vec<i64> = train
            .column(schema::EMP_ID)
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert!(!train_ids.contains(&2));
    }

    #[test]
    fn test_empty_id_list_keeps_everything_in_train() {
        let df = sample();
        let (train, test) = split_by_ids(&df, &[]).unwrap();
        assert_eq!(train.height(), df.height());
        assert_eq!(test.height(), 0);
    }

    #[test]
    fn test_unknown_ids_match_nothing() {
        let df = sample();
        let (train, test) = split_by_ids(&df, &[99]).unwrap();
        assert_eq!(train.height(), df.height());
        assert_eq!(test.height(), 0);
    }
}
