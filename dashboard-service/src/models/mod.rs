pub mod site;

pub use site::{
    AlignmentRow, ClusterReadinessRow, MonthlyActivationRow, ProgressPointRow, VendorStatusRow,
};
