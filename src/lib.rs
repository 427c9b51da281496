pub mod error;
pub mod expr;
pub mod integrate;

pub use error::{Error, Result};
pub use expr::{evaluate, Function};
pub use integrate::{
    monte_carlo, simpson, trapezoid, IntegrationRequest, IntegrationResult, Integrator,
    SampledFunction,
};
