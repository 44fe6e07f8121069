use super::Rect;
use crate::{common::*, Transform};

/// Bounding box in XYXY (corner) format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XYXY<T> {
    pub(crate) xmin: T,
    pub(crate) ymin: T,
    pub(crate) xmax: T,
    pub(crate) ymax: T,
}

impl<T> XYXY<T> {
    pub fn try_cast<V>(self) -> Option<XYXY<V>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(XYXY {
            xmin: V::from(self.xmin)?,
            ymin: V::from(self.ymin)?,
            xmax: V::from(self.xmax)?,
            ymax: V::from(self.ymax)?,
        })
    }

    pub fn cast<V>(self) -> XYXY<V>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T> XYXY<T>
where
    T: Copy + Num + PartialOrd,
{
    /// Maps both corners through `transform` and re-normalizes the min/max
    /// order, so that mirroring transforms still yield a valid box.
    pub fn transform(&self, transform: &Transform<T>) -> Self {
        let x1 = self.xmin * transform.sx + transform.tx;
        let x2 = self.xmax * transform.sx + transform.tx;
        let y1 = self.ymin * transform.sy + transform.ty;
        let y2 = self.ymax * transform.sy + transform.ty;

        let (xmin, xmax) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (ymin, ymax) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };

        XYXY {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }
}

impl<T> Rect for XYXY<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn xmin(&self) -> Self::Type {
        self.xmin
    }

    fn ymin(&self) -> Self::Type {
        self.ymin
    }

    fn xmax(&self) -> Self::Type {
        self.xmax
    }

    fn ymax(&self) -> Self::Type {
        self.ymax
    }

    fn cx(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.xmin + self.w() / two
    }

    fn cy(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.ymin + self.h() / two
    }

    fn w(&self) -> Self::Type {
        self.xmax - self.xmin
    }

    fn h(&self) -> Self::Type {
        self.ymax - self.ymin
    }

    fn try_from_xyxy(xyxy: [Self::Type; 4]) -> Result<Self> {
        let [xmin, ymin, xmax, ymax] = xyxy;
        ensure!(
            xmax >= xmin && ymax >= ymin,
            "xmax >= xmin and ymax >= ymin must hold"
        );

        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    fn try_from_xywh(xywh: [Self::Type; 4]) -> Result<Self> {
        let [xmin, ymin, w, h] = xywh;
        let xmax = xmin + w;
        let ymax = ymin + h;
        Self::try_from_xyxy([xmin, ymin, xmax, ymax])
    }
}
