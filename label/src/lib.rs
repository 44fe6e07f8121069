use bbox::{Rect, Transform, XYXY};
use num_traits::Num;
use std::ops::Mul;

/// An object annotation: a bounding box paired with a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label<R, C>
where
    R: Rect,
{
    pub rect: R,
    pub class: C,
}

impl<R, C> Label<R, C>
where
    R: Rect,
{
    /// Replaces the class while keeping the box, e.g. when mapping class
    /// names to class indexes.
    pub fn map_class<D>(self, f: impl FnOnce(C) -> D) -> Label<R, D> {
        Label {
            rect: self.rect,
            class: f(self.class),
        }
    }
}

impl<'a, T, C> Mul<&'a Label<XYXY<T>, C>> for &'a Transform<T>
where
    T: Copy + Num + PartialOrd,
    C: Copy,
{
    type Output = Label<XYXY<T>, C>;

    fn mul(self, rhs: &'a Label<XYXY<T>, C>) -> Self::Output {
        Label {
            rect: self * &rhs.rect,
            class: rhs.class,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbox::RectExt;

    #[test]
    fn label_transform_keeps_class() {
        let label = Label {
            rect: XYXY::from_xyxy([10.0, 50.0, 300.0, 200.0]),
            class: 2usize,
        };
        let flip = Transform::horizontal_flip(640.0);
        let flipped = &flip * &label;
        assert_eq!(flipped.class, 2);
        assert_eq!(flipped.rect, XYXY::from_xyxy([340.0, 50.0, 630.0, 200.0]));
    }

    #[test]
    fn label_map_class() {
        let label = Label {
            rect: XYXY::from_xyxy([0.0, 0.0, 10.0, 10.0]),
            class: "Car".to_owned(),
        };
        let indexed = label.map_class(|_| 1usize);
        assert_eq!(indexed.class, 1);
    }
}
