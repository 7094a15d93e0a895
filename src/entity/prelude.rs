//! 预导入模块，方便使用

pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
