use proptest::prelude::*;

use rf::geom::Ray;
use rf::math::{Mat4, Point3, Quat, Vec3, pt3, vec3};
use rayform_geom::BBox;
use rayform_geom::bbox::BBoxi;
use rayform_geom::io::{AnyBBox, Decode, Encode, Error};

fn finite() -> impl Strategy<Value = f64> {
    -1e6..1e6
}

fn pt3s() -> impl Strategy<Value = Point3> {
    (finite(), finite(), finite()).prop_map(|(x, y, z)| pt3(x, y, z))
}

fn any_bboxes() -> impl Strategy<Value = AnyBBox> {
    prop_oneof![
        (pt3s(), pt3s()).prop_map(|(a, b)| AnyBBox::F64(BBox::new(a, b))),
        (pt3s(), pt3s()).prop_map(|(a, b)| {
            let a = pt3(a.x() as f32, a.y() as f32, a.z() as f32);
            let b = pt3(b.x() as f32, b.y() as f32, b.z() as f32);
            AnyBBox::F32(BBox::new(a, b))
        }),
        (any::<[i32; 3]>(), any::<[i32; 3]>()).prop_map(|(a, b)| {
            AnyBBox::I32(BBox::new(a.into(), b.into()))
        }),
    ]
}

proptest! {
    #[test]
    fn box_bytes_decode_to_equal_box(b in any_bboxes()) {
        let bytes = b.to_bytes();
        prop_assert_eq!(bytes.len(), b.encoded_len());
        prop_assert_eq!(bytes[0], b.tag());
        prop_assert_eq!(AnyBBox::decode(&mut &bytes[..]), Ok(b));
    }

    #[test]
    fn every_prefix_is_truncated(b in any_bboxes()) {
        let bytes = b.to_bytes();
        for n in 0..bytes.len() {
            let res = AnyBBox::decode(&mut &bytes[..n]);
            prop_assert!(
                matches!(res, Err(Error::Truncated { .. })),
                "prefix of {n} bytes gave {res:?}"
            );
        }
    }

    #[test]
    fn unknown_tags_are_rejected(tag in 4u8.., rest in any::<[u8; 24]>()) {
        let mut bytes = vec![tag];
        bytes.extend_from_slice(&rest);
        prop_assert_eq!(
            AnyBBox::decode(&mut &bytes[..]),
            Err(Error::UnknownTag(tag))
        );
    }

    #[test]
    fn ray_bytes_are_origin_then_direction(o in pt3s(), d in pt3s()) {
        let r: Ray<Point3> = Ray(o, d.to_vec());
        let bytes = r.to_bytes();
        let mut head = &bytes[..24];
        let mut tail = &bytes[24..];
        prop_assert_eq!(Point3::decode(&mut head), Ok(o));
        prop_assert_eq!(Vec3::decode(&mut tail), Ok(d.to_vec()));
    }
}

#[test]
fn values_in_sequence() {
    let m: Mat4 = Mat4::identity();
    let q: Quat = Quat::new(0.0, 0.0, 1.0, 0.0);
    let b: BBoxi = BBox::new(pt3(-1, -2, -3), pt3(1, 2, 3));

    let mut bytes = Vec::new();
    m.encode(&mut bytes);
    q.encode(&mut bytes);
    b.encode(&mut bytes);
    let v: Vec3<f32> = vec3(1.0, 2.0, 3.0);
    v.encode(&mut bytes);
    assert_eq!(bytes.len(), 128 + 32 + 24 + 12);

    let buf = &mut &bytes[..];
    assert_eq!(Mat4::decode(buf), Ok(m));
    assert_eq!(Quat::decode(buf), Ok(q));
    assert_eq!(BBoxi::decode(buf), Ok(b));
    let w: Vec3<f32> = Decode::decode(buf).unwrap();
    assert_eq!(w, v);
    assert!(buf.is_empty());

    assert_eq!(
        Quat::<f64>::decode(buf),
        Err(Error::Truncated { needed: 32, remaining: 0 })
    );
}
