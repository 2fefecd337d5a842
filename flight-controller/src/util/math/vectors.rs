use core::ops::{AddAssign, Div, Sub};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AccelerationVector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sub<AccelerationVector3D> for AccelerationVector3D {
    type Output = AccelerationVector3D;

    fn sub(self, rhs: AccelerationVector3D) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl AddAssign<AccelerationVector3D> for AccelerationVector3D {
    fn add_assign(&mut self, rhs: AccelerationVector3D) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Div<f64> for AccelerationVector3D {
    type Output = AccelerationVector3D;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RotationVector3D {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Sub<RotationVector3D> for RotationVector3D {
    type Output = RotationVector3D;

    fn sub(self, rhs: RotationVector3D) -> Self::Output {
        Self {
            roll: self.roll - rhs.roll,
            pitch: self.pitch - rhs.pitch,
            yaw: self.yaw - rhs.yaw,
        }
    }
}

impl AddAssign<RotationVector3D> for RotationVector3D {
    fn add_assign(&mut self, rhs: RotationVector3D) {
        self.roll += rhs.roll;
        self.pitch += rhs.pitch;
        self.yaw += rhs.yaw;
    }
}

impl Div<f64> for RotationVector3D {
    type Output = RotationVector3D;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            roll: self.roll / rhs,
            pitch: self.pitch / rhs,
            yaw: self.yaw / rhs,
        }
    }
}
