use super::{HW, XYXY};
use crate::common::*;

/// The generic axis-aligned rectangle.
pub trait Rect {
    type Type;

    fn xmin(&self) -> Self::Type;
    fn ymin(&self) -> Self::Type;
    fn xmax(&self) -> Self::Type;
    fn ymax(&self) -> Self::Type;
    fn cx(&self) -> Self::Type;
    fn cy(&self) -> Self::Type;
    fn w(&self) -> Self::Type;
    fn h(&self) -> Self::Type;

    fn try_from_xyxy(xyxy: [Self::Type; 4]) -> Result<Self>
    where
        Self: Sized;

    fn try_from_xywh(xywh: [Self::Type; 4]) -> Result<Self>
    where
        Self: Sized;
}

pub trait RectExt: Rect
where
    Self::Type: Num + PartialOrd,
{
    fn from_xyxy(xyxy: [Self::Type; 4]) -> Self
    where
        Self: Sized,
    {
        Self::try_from_xyxy(xyxy).unwrap()
    }

    fn from_xywh(xywh: [Self::Type; 4]) -> Self
    where
        Self: Sized,
    {
        Self::try_from_xywh(xywh).unwrap()
    }

    fn xyxy(&self) -> [Self::Type; 4] {
        [self.xmin(), self.ymin(), self.xmax(), self.ymax()]
    }

    fn xywh(&self) -> [Self::Type; 4] {
        [self.xmin(), self.ymin(), self.w(), self.h()]
    }

    fn size(&self) -> HW<Self::Type>
    where
        Self::Type: Copy,
    {
        HW::from_hw([self.h(), self.w()])
    }

    fn area(&self) -> <Self::Type as Mul<Self::Type>>::Output
    where
        Self::Type: Mul<Self::Type>,
    {
        self.h() * self.w()
    }

    fn to_xyxy(&self) -> XYXY<Self::Type>
    where
        Self::Type: Copy,
    {
        XYXY::from_xyxy(self.xyxy())
    }

    /// Tests whether the rectangle lies within an image of the given size,
    /// origin at the top-left corner.
    fn fits_within(&self, size: &HW<Self::Type>) -> bool
    where
        Self::Type: Copy,
    {
        let zero = Self::Type::zero();
        self.xmin() >= zero
            && self.ymin() >= zero
            && self.xmax() <= size.w()
            && self.ymax() <= size.h()
    }
}

impl<T> RectExt for T
where
    T: Rect,
    T::Type: Num + PartialOrd,
{
}
