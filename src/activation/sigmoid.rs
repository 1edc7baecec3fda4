/// Logistic function `1 / (1 + e^-x)`.
///
/// Branches on the sign of `x` so that `exp` is only ever evaluated on a
/// non-positive argument and cannot overflow.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Derivative of the sigmoid written in terms of its output `y = sigmoid(x)`.
pub fn sigmoid_derivative_from_output(y: f64) -> f64 {
    y * (1.0 - y)
}
