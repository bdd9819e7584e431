use msgpack_slice::{Error, ErrorCode, Family, OutputBuffer, Unpacked, Unpacker, last_error};

const TEST: &[u8] = b"test";

/// Write with `op` into a 1 KiB region and return the encoded bytes.
fn write_with(op: impl FnOnce(&mut OutputBuffer<'_>) -> msgpack_slice::Result<()>) -> Vec<u8> {
    let mut storage = vec![0u8; 1024];
    let mut out = OutputBuffer::new(&mut storage);
    op(&mut out).unwrap();
    assert_eq!(last_error(), ErrorCode::Ok);
    out.as_slice().to_vec()
}

/// Build a length-prefixed payload whose first bytes are `test` and whose
/// remainder is zero-filled, mirroring a header that claims `len` bytes.
fn padded(len: usize) -> Vec<u8> {
    let mut payload = vec![0u8; len];
    let head = TEST.len().min(len);
    payload[..head].copy_from_slice(&TEST[..head]);
    payload
}

#[test]
fn scalar_write_vectors() {
    assert_eq!(write_with(|o| o.write_nil()), [0xC0]);
    assert_eq!(write_with(|o| o.write_integer(-32)), [0xE0]);
    assert_eq!(write_with(|o| o.write_integer(127)), [0x7F]);
    assert_eq!(write_with(|o| o.write_u8(0x80)), [0xCC, 0x80]);
    assert_eq!(write_with(|o| o.write_u32(0xA5)), [0xCE, 0x00, 0x00, 0x00, 0xA5]);
    assert_eq!(
        write_with(|o| o.write_u64(0xA5)),
        [0xCF, 0, 0, 0, 0, 0, 0, 0, 0xA5]
    );
    assert_eq!(write_with(|o| o.write_s32(-0xA5)), [0xD2, 0xFF, 0xFF, 0xFF, 0x5B]);
    assert_eq!(write_with(|o| o.write_f32(2.718)), [0xCA, 0x40, 0x2D, 0xF3, 0xB6]);
    assert_eq!(write_with(|o| o.write_f64(0.0)), [0xCB, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(
        write_with(|o| o.write_f64(3.141_592_65)),
        [0xCB, 0x40, 0x09, 0x21, 0xFB, 0x53, 0xC8, 0xD4, 0xF1]
    );
}

#[test]
fn string_and_binary_write_vectors() {
    let s = |len: usize| String::from_utf8(padded(len)).unwrap();

    let out = write_with(|o| o.write_str8(&s(0xA5)));
    assert_eq!(&out[..6], b"\xd9\xa5test");
    assert_eq!(out.len(), 0xA7);

    let out = write_with(|o| o.write_str(&s(0xFF)));
    assert_eq!(&out[..6], b"\xd9\xfftest");
    assert_eq!(out.len(), 0x101);

    let out = write_with(|o| o.write_str16(&s(0xA5)));
    assert_eq!(&out[..7], b"\xda\x00\xa5test");
    assert_eq!(out.len(), 0xA8);

    let out = write_with(|o| o.write_str32(&s(0x2A5)));
    assert_eq!(&out[..9], b"\xdb\x00\x00\x02\xa5test");
    assert_eq!(out.len(), 0x2AA);

    let out = write_with(|o| o.write_bin(&padded(0xFF)));
    assert_eq!(&out[..6], b"\xc4\xfftest");
    assert_eq!(out.len(), 0x101);

    let out = write_with(|o| o.write_bin(&padded(0x200)));
    assert_eq!(&out[..7], b"\xc5\x02\x00test");
    assert_eq!(out.len(), 0x203);

    let out = write_with(|o| o.write_bin32(&padded(0x2A5)));
    assert_eq!(&out[..9], b"\xc6\x00\x00\x02\xa5test");
    assert_eq!(out.len(), 0x2AA);
}

#[test]
fn string_read_vectors() {
    let cases: [(&[u8], usize, Family, u32); 6] = [
        (&b"\xa0"[..], 1, Family::Str, 0),
        (&b"\xbftest"[..], 32, Family::Str, 31),
        (&b"\xd9\xfftest"[..], 0x101, Family::Str, 0xFF),
        (&b"\xdb\x00\x00\x02\xa5test"[..], 0x2AA, Family::Str, 0x2A5),
        (&b"\xc4\x1ftest"[..], 33, Family::Bin, 31),
        (&b"\xc5\x02\x00test"[..], 0x203, Family::Bin, 0x200),
    ];
    for (head, total, family, len) in cases {
        let mut input = head.to_vec();
        input.resize(total, 0);

        for filter in [Family::Any, family] {
            let mut unpacker = Unpacker::new(&input);
            let mut dest = vec![0u8; 1024];
            let unpacked = unpacker.decode(Some(dest.as_mut_slice()), filter).unwrap();
            assert_eq!(unpacked, Unpacked { family, len });
            let check = (len as usize).min(TEST.len());
            assert_eq!(&dest[..check], &TEST[..check]);
            assert_eq!(unpacker.position(), total);
            assert_eq!(last_error(), ErrorCode::Ok);
        }
    }
}

#[test]
fn probe_reports_length_without_consuming() {
    let cases: [(&[u8], Family, u32); 4] = [
        (&b"\xc3"[..], Family::Bool, 1),
        (&b"\xe0"[..], Family::S8, 1),
        (&b"\xcf\x00\x00\x00\x00\x00\x00\x00\xa5"[..], Family::U64, 8),
        (&b"\xda\x02\x00"[..], Family::Str, 0x200),
    ];
    for (input, family, len) in cases {
        let mut unpacker = Unpacker::new(input);
        let unpacked = unpacker.decode(None, Family::Any).unwrap();
        assert_eq!(unpacked, Unpacked { family, len });
        assert_eq!(unpacker.position(), 0);
        assert_eq!(last_error(), ErrorCode::Ok);
    }
}

#[test]
fn uint8_tag_without_payload_is_end_of_input() {
    let input = [0xCC];
    let mut unpacker = Unpacker::new(&input);
    let mut dest = [0u8; 8];
    let err = unpacker.decode(Some(&mut dest[..]), Family::Any).unwrap_err();
    assert_eq!(err.code(), ErrorCode::EndOfInput);
    assert_eq!(last_error(), ErrorCode::EndOfInput);
    assert_eq!(unpacker.position(), 0);
}

#[test]
fn map16_without_count_is_end_of_input() {
    let input = [0xDE];
    let mut unpacker = Unpacker::new(&input);
    let err = unpacker.decode(None, Family::Any).unwrap_err();
    assert_eq!(
        err,
        Error::EndOfInput {
            needed: 2,
            available: 0
        }
    );
    assert_eq!(unpacker.position(), 0);
}

#[test]
fn failed_reads_can_be_retried() {
    let input = b"\xa4test\x2a";
    let mut unpacker = Unpacker::new(input);

    let mut small = [0u8; 2];
    assert!(matches!(
        unpacker.decode(Some(&mut small[..]), Family::Any),
        Err(Error::OutputFull { needed: 4, available: 2 })
    ));
    assert!(matches!(
        unpacker.decode(None, Family::Bin),
        Err(Error::UnexpectedType { .. })
    ));
    assert_eq!(unpacker.position(), 0);

    let mut text = [0u8; 4];
    assert_eq!(unpacker.read_str(&mut text).unwrap(), "test");
    assert_eq!(unpacker.read_int().unwrap(), 42);
    assert!(unpacker.is_empty());
}

#[test]
fn min_width_law() {
    let cases: [(i64, usize); 10] = [
        (127, 1),
        (128, 2),
        (-32, 1),
        (-33, 2),
        (-128, 2),
        (-129, 3),
        (0xFFFF, 3),
        (0x1_0000, 5),
        (i64::from(i32::MIN), 5),
        (i64::from(i32::MIN) - 1, 9),
    ];
    for (value, size) in cases {
        let out = write_with(|o| o.write_integer(value));
        assert_eq!(out.len(), size, "value {value}");

        let mut unpacker = Unpacker::new(&out);
        assert_eq!(unpacker.read_int().unwrap(), value);
    }
}
