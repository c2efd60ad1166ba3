//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod client;
pub mod combo;
pub mod dining_table;
pub mod drink;
pub mod employee;
pub mod ingredient;
pub mod inventory;
pub mod line_item;
pub mod order;
pub mod payment;
pub mod payment_method;
pub mod product;
pub mod reservation;
pub mod supplier;
pub mod tab;

// Re-export specific types to avoid conflicts
pub use client::{Entity as Client, Model as ClientModel};
pub use combo::{Entity as Combo, Model as ComboModel};
pub use dining_table::{Entity as DiningTable, Model as DiningTableModel};
pub use drink::{Entity as Drink, Model as DrinkModel};
pub use employee::{Entity as Employee, Model as EmployeeModel};
pub use ingredient::{Entity as Ingredient, Model as IngredientModel};
pub use inventory::{Entity as Inventory, Model as InventoryModel};
pub use line_item::{Entity as LineItem, ItemKind, Model as LineItemModel};
pub use order::{Entity as Order, Model as OrderModel};
pub use payment::{Entity as Payment, Model as PaymentModel};
pub use payment_method::{Entity as PaymentMethod, Model as PaymentMethodModel};
pub use product::{Entity as Product, Model as ProductModel};
pub use reservation::{Entity as Reservation, Model as ReservationModel};
pub use supplier::{Entity as Supplier, Model as SupplierModel};
pub use tab::{Entity as Tab, Model as TabModel, TabStatus};
