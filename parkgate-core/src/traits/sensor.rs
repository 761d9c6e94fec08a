//! Vehicle presence sensor trait

/// Raw digital presence sensor
///
/// `read` returns the instantaneous, undebounced level with any wiring
/// inversion already applied: `true` means a vehicle is present.
///
/// Takes `&mut self` because pin reads may need mutable access.
pub trait PresenceSensor {
    fn read(&mut self) -> bool;
}

impl<T: PresenceSensor + ?Sized> PresenceSensor for &mut T {
    fn read(&mut self) -> bool {
        (**self).read()
    }
}
