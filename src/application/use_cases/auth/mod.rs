pub mod current_player;
pub mod login;
pub mod me;
pub mod signup;
