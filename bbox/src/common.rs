pub use anyhow::{ensure, Result};
pub use num_traits::{Num, NumCast, ToPrimitive, Zero};
pub use std::ops::{Mul, Neg};
