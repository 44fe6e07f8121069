use super::{Rect, XYXY};
use crate::{common::*, RectExt, HW};

/// An axis-aligned affine transform on pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transform<T> {
    pub sx: T,
    pub sy: T,
    pub tx: T,
    pub ty: T,
}

impl<T> Transform<T>
where
    T: Copy + Num + PartialOrd,
{
    pub fn identity() -> Self {
        Self {
            sx: T::one(),
            sy: T::one(),
            tx: T::zero(),
            ty: T::zero(),
        }
    }

    pub fn from_rects<R>(src: &R, tgt: &R) -> Self
    where
        R: Rect<Type = T>,
    {
        let sx = tgt.w() / src.w();
        let sy = tgt.h() / src.h();
        let tx = tgt.xmin() - src.xmin() * sx;
        let ty = tgt.ymin() - src.ymin() * sy;

        Self { sx, sy, tx, ty }
    }

    pub fn from_sizes_exact(src_size: &HW<T>, tgt_size: &HW<T>) -> Self {
        let zero = T::zero();
        let src = XYXY::from_xywh([zero, zero, src_size.w(), src_size.h()]);
        let tgt = XYXY::from_xywh([zero, zero, tgt_size.w(), tgt_size.h()]);
        Self::from_rects(&src, &tgt)
    }
}

impl<T> Transform<T>
where
    T: Copy + Num + Neg<Output = T>,
{
    /// The mirror over the vertical axis of an image `width` pixels wide,
    /// mapping x to `width - x`.
    pub fn horizontal_flip(width: T) -> Self {
        Self {
            sx: -T::one(),
            sy: T::one(),
            tx: width,
            ty: T::zero(),
        }
    }

    /// The mirror over the horizontal axis of an image `height` pixels tall.
    pub fn vertical_flip(height: T) -> Self {
        Self {
            sx: T::one(),
            sy: -T::one(),
            tx: T::zero(),
            ty: height,
        }
    }

    pub fn inverse(&self) -> Self {
        let sx = T::one() / self.sx;
        let sy = T::one() / self.sy;
        let tx = -self.tx / self.sx;
        let ty = -self.ty / self.sy;

        Self { sx, sy, tx, ty }
    }
}

impl<T> Transform<T> {
    pub fn try_cast<V>(self) -> Option<Transform<V>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(Transform {
            sx: V::from(self.sx)?,
            sy: V::from(self.sy)?,
            tx: V::from(self.tx)?,
            ty: V::from(self.ty)?,
        })
    }

    pub fn cast<V>(self) -> Transform<V>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T> Mul<&XYXY<T>> for &Transform<T>
where
    T: Copy + Num + PartialOrd,
{
    type Output = XYXY<T>;

    fn mul(self, rhs: &XYXY<T>) -> Self::Output {
        rhs.transform(self)
    }
}

impl<T> Mul<&Transform<T>> for &Transform<T>
where
    T: Copy + Num,
{
    type Output = Transform<T>;

    fn mul(self, rhs: &Transform<T>) -> Self::Output {
        Transform {
            sx: self.sx * rhs.sx,
            sy: self.sy * rhs.sy,
            tx: rhs.tx * self.sx + self.tx,
            ty: rhs.ty * self.sy + self.ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_inverse() {
        let orig = Transform {
            sx: 2.0,
            sy: 2.0,
            tx: 1.0,
            ty: 1.0,
        };
        assert_eq!(orig.inverse().inverse(), orig);
    }

    #[test]
    fn transform_resize_exact() {
        let transform = Transform::from_sizes_exact(
            &HW::from_hw([80.0, 80.0]),
            &HW::from_hw([20.0, 40.0]),
        );
        let expect = Transform {
            sx: 0.5,
            sy: 0.25,
            tx: 0.0,
            ty: 0.0,
        };
        assert_eq!(transform, expect);
    }

    #[test]
    fn transform_horizontal_flip_renormalizes_corners() {
        let flip = Transform::horizontal_flip(640.0);
        let bbox = XYXY::from_xyxy([10.0, 50.0, 300.0, 200.0]);
        let flipped = &flip * &bbox;
        assert_eq!(flipped, XYXY::from_xyxy([340.0, 50.0, 630.0, 200.0]));

        // flipping twice is the identity
        assert_eq!(&flip * &flipped, bbox);
    }

    #[test]
    fn transform_compose() {
        let scale = Transform {
            sx: 2.0,
            sy: 2.0,
            tx: 0.0,
            ty: 0.0,
        };
        let shift = Transform {
            sx: 1.0,
            sy: 1.0,
            tx: 3.0,
            ty: 4.0,
        };
        let bbox = XYXY::from_xyxy([1.0, 1.0, 2.0, 2.0]);
        let composed = &scale * &shift;
        assert_eq!(&composed * &bbox, &scale * &(&shift * &bbox));
    }
}
