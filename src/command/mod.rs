pub mod add_admin;
