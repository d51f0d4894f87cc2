pub mod auth;
pub mod food;

pub use auth::{LoginRequest, LoginResponse};
pub use food::{ApiResponseDto, FoodCreated, FoodDto, PatchOperation};
