pub mod auth;
pub mod buddies;
pub mod goals;
pub mod home;
pub mod jar;
pub mod settings;
pub mod transactions;

pub use auth::*;
pub use buddies::*;
pub use goals::*;
pub use home::*;
pub use jar::*;
pub use settings::*;
pub use transactions::*;
