// Copyright (c) 2024 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The error module contains the `Error` type returned by the library.

use thiserror::Error;

/// The errors that the geodesic calculations may return.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// An ellipsoid, position or calculation parameter is out of range.
    #[error("invalid parameter: {parameter} = {value}")]
    InvalidParameter {
        /// The name of the parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Two positions are defined on differently named ellipsoids.
    #[error("ellipsoid mismatch: {first} and {second}")]
    EllipsoidMismatch {
        /// The name of the first position's ellipsoid.
        first: String,
        /// The name of the second position's ellipsoid.
        second: String,
    },

    /// The inverse geodesic iteration did not converge, e.g. for nearly
    /// antipodal positions.
    #[error("geodesic inverse calculation did not converge after {iterations} iterations")]
    ConvergenceFailure {
        /// The number of iterations performed.
        iterations: u32,
    },
}

/// Convenience type alias for results using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
