pub mod budget_groups;

pub use budget_groups::BudgetGroupRepo;
