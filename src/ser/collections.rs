use super::cursor::ByteReader;
use super::error::{SerError, SerKind, SerResult};
use super::writer::ByteWriter;

/// Writes a slice with a `u32` item count prefix.
pub fn write_vec<T, F>(
    out: &mut ByteWriter,
    items: &[T],
    kind: SerKind,
    field: &'static str,
    mut write_item: F,
) -> SerResult<()>
where
    F: FnMut(&mut ByteWriter, &T) -> SerResult<()>,
{
    out.put_count(items.len(), kind, field)?;
    for item in items {
        write_item(out, item)?;
    }
    Ok(())
}

/// Reads a vector written by [`write_vec`]. `item_size` is the minimum
/// encoded width of one item and bounds the preallocation.
pub fn read_vec<T, F>(
    cursor: &mut ByteReader<'_>,
    item_size: usize,
    kind: SerKind,
    field: &'static str,
    mut read_item: F,
) -> SerResult<Vec<T>>
where
    F: FnMut(&mut ByteReader<'_>) -> SerResult<T>,
{
    let count = cursor.read_count(item_size, kind, field)?;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(read_item(cursor)?);
    }
    Ok(out)
}

/// Writes an optional value with a `u8` discriminant (0 = None, 1 = Some).
pub fn write_option<T, F>(out: &mut ByteWriter, value: &Option<T>, mut write: F) -> SerResult<()>
where
    F: FnMut(&mut ByteWriter, &T) -> SerResult<()>,
{
    match value {
        Some(inner) => {
            out.put_u8(1);
            write(out, inner)
        }
        None => {
            out.put_u8(0);
            Ok(())
        }
    }
}

/// Reads an optional value written by [`write_option`].
pub fn read_option<T, F>(
    cursor: &mut ByteReader<'_>,
    kind: SerKind,
    field: &'static str,
    mut read: F,
) -> SerResult<Option<T>>
where
    F: FnMut(&mut ByteReader<'_>) -> SerResult<T>,
{
    match cursor.read_u8(kind, field)? {
        0 => Ok(None),
        1 => Ok(Some(read(cursor)?)),
        _ => Err(SerError::invalid_value(kind, field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_and_option_roundtrip() {
        let mut out = ByteWriter::new();
        write_vec(&mut out, &[7u32, 9], SerKind::Ids, "ids", |w, v| {
            w.put_u32(*v);
            Ok(())
        })
        .unwrap();
        write_option(&mut out, &Some(true), |w, v| {
            w.put_bool(*v);
            Ok(())
        })
        .unwrap();
        write_option::<bool, _>(&mut out, &None, |_, _| Ok(())).unwrap();

        let bytes = out.into_bytes();
        let mut reader = ByteReader::new(&bytes);
        let ids = read_vec(&mut reader, 4, SerKind::Ids, "ids", |r| {
            r.read_u32(SerKind::Ids, "id")
        })
        .unwrap();
        assert_eq!(ids, vec![7, 9]);
        let some = read_option(&mut reader, SerKind::Flags, "flags", |r| {
            r.read_bool(SerKind::Flags, "flag")
        })
        .unwrap();
        assert_eq!(some, Some(true));
        let none = read_option(&mut reader, SerKind::Flags, "flags", |r| {
            r.read_bool(SerKind::Flags, "flag")
        })
        .unwrap();
        assert_eq!(none, None);
        reader.finish(SerKind::Flags).unwrap();
    }

    #[test]
    fn option_rejects_unknown_discriminant() {
        let mut reader = ByteReader::new(&[3]);
        let err = read_option(&mut reader, SerKind::Flags, "flags", |r| {
            r.read_bool(SerKind::Flags, "flag")
        })
        .unwrap_err();
        assert_eq!(err, SerError::invalid_value(SerKind::Flags, "flags"));
    }
}
