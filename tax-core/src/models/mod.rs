mod filing_status;
mod income_type;
mod standard_deduction;
mod tax_bracket;
mod tax_bracket_schedule;
mod tax_input;
mod tax_result;
mod tax_tables;

pub use filing_status::{FilingStatus, ParseFilingStatusError};
pub use income_type::{IncomeType, ParseIncomeTypeError};
pub use standard_deduction::StandardDeductionTable;
pub use tax_bracket::TaxBracket;
pub use tax_bracket_schedule::{ScheduleError, TaxBracketSchedule};
pub use tax_input::TaxInput;
pub use tax_result::{BandTax, TaxResult};
pub use tax_tables::{SELF_EMPLOYMENT_TAX_RATE, TaxTables, TaxTableError};
