//! Column names of the raw attrition dataset.
//!
//! The upstream spreadsheet ships one row per (employee, month)
//! observation with a fixed, implicit schema. Column names are kept
//! verbatim (including the odd `MMM-YY` month header) so frames stay
//! joinable against the source.

/// Employee identifier. Not unique per row.
pub const EMP_ID: &str = "Emp_ID";

/// Observation month of the record.
pub const MONTH: &str = "MMM-YY";

/// Date the employee joined. Constant per employee.
pub const DATE_OF_JOINING: &str = "Dateofjoining";

/// Last working date; null means still employed as of the latest data.
pub const LAST_WORKING_DATE: &str = "LastWorkingDate";

/// Monthly salary.
pub const SALARY: &str = "Salary";

/// Business value generated in the month. May be negative.
pub const TOTAL_BUSINESS_VALUE: &str = "Total Business Value";

/// The three date columns that arrive as `YYYY-MM-DD` strings.
pub const DATE_COLUMNS: [&str; 3] = [MONTH, DATE_OF_JOINING, LAST_WORKING_DATE];

/// Derived feature: relative salary growth over the visible window.
pub const SALARY_CHANGE: &str = "Salary Change";

/// Derived feature: total business value over the visible window.
pub const TOTAL_BUSINESS_VALUE_ALL: &str = "Total Business Value All";

/// Derived feature: mean of row-wise business value / salary.
pub const OVERVALUE: &str = "Overvalue";

/// Derived feature: tenure in months, rounded up.
pub const WORK_EXPERIENCE: &str = "Work Experience";

/// Derived label: whether the employee departed within the window.
pub const FIRED: &str = "Fired";

/// Feature columns fed to the classifier, in matrix order.
///
/// `Emp_ID` and `Fired` are deliberately excluded: the identifier is
/// carried separately and the label never enters the design matrix.
pub const FEATURE_COLUMNS: [&str; 4] = [
    SALARY_CHANGE,
    TOTAL_BUSINESS_VALUE_ALL,
    OVERVALUE,
    WORK_EXPERIENCE,
];

/// Column name of the predicted label in the output file.
pub const TARGET: &str = "Target";
