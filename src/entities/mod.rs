//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod asset;
pub mod asset_status;
pub mod asset_transfer;
pub mod department;
pub mod employee;
pub mod location;

// Re-export specific types to avoid conflicts
pub use asset::{Column as AssetColumn, Entity as Asset, Model as AssetModel};
pub use asset_status::{
    Column as AssetStatusColumn, Entity as AssetStatus, Model as AssetStatusModel,
};
pub use asset_transfer::{
    Column as AssetTransferColumn, Entity as AssetTransfer, Model as AssetTransferModel,
};
pub use department::{Column as DepartmentColumn, Entity as Department, Model as DepartmentModel};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use location::{Column as LocationColumn, Entity as Location, Model as LocationModel};
