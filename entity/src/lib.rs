pub mod device;
pub mod packet;
pub mod packet_field;
pub mod permission;
pub mod project;
pub mod role;
pub mod user;
pub mod user_role;
