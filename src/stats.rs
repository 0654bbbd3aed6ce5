//! # Stats
//!
//! $$
//! \Phi(x)=\frac{1}{\sqrt{2\pi}}\int_{-\infty}^{x}e^{-u^2/2}\,du
//! $$
//!
pub mod normal;
