//! Specialized data structures
//!
//! - **[`ring_buffer`]**: fixed-capacity FIFO buffer backing every rolling
//!   window in the monitoring engine
//!
//! ## Usage
//!
//! ```rust
//! use textops_common::collections::RingBuffer;
//!
//! let mut window = RingBuffer::new(3);
//! for latency in [12.0, 15.0, 11.0, 40.0] {
//!     window.push(latency);
//! }
//! assert_eq!(window.to_vec(), vec![15.0, 11.0, 40.0]);
//! ```

pub mod ring_buffer;

// Re-export commonly used types
pub use ring_buffer::RingBuffer;
