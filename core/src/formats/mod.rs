pub mod beam;

pub use beam::Beam;
