use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign};

/// Linear RGB radiance / reflectance triple.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const ZERO: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Rgb {
        Rgb { r, g, b }
    }

    pub const fn splat(v: f32) -> Rgb {
        Rgb::new(v, v, v)
    }

    pub fn is_black(self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    /// Summed channel power, the weight used for light importance sampling.
    pub fn power(self) -> f32 {
        self.r + self.g + self.b
    }
}

impl Add for Rgb {
    type Output = Rgb;
    fn add(self, other: Rgb) -> Rgb {
        Rgb::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl AddAssign for Rgb {
    fn add_assign(&mut self, other: Rgb) {
        *self = *self + other;
    }
}

impl Mul for Rgb {
    type Output = Rgb;
    fn mul(self, other: Rgb) -> Rgb {
        Rgb::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }
}

impl MulAssign for Rgb {
    fn mul_assign(&mut self, other: Rgb) {
        *self = *self * other;
    }
}

impl Mul<f32> for Rgb {
    type Output = Rgb;
    fn mul(self, other: f32) -> Rgb {
        Rgb::new(self.r * other, self.g * other, self.b * other)
    }
}

impl Mul<Rgb> for f32 {
    type Output = Rgb;
    fn mul(self, other: Rgb) -> Rgb {
        other * self
    }
}

impl Div<f32> for Rgb {
    type Output = Rgb;
    fn div(self, other: f32) -> Rgb {
        Rgb::new(self.r / other, self.g / other, self.b / other)
    }
}

impl DivAssign<f32> for Rgb {
    fn div_assign(&mut self, other: f32) {
        *self = *self / other;
    }
}
