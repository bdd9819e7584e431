//! Encode a small person record as a map, then walk it back with the unpacker

use msgpack_slice::{Family, OutputBuffer, Unpacker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut storage = [0u8; 64];

    // ["name":"Joan", "age":30, "gender":"female"]
    let mut out = OutputBuffer::new(&mut storage);
    out.write_map(3)?;
    out.write_str("name")?;
    out.write_str("Joan")?;
    out.write_str("age")?;
    out.write_integer(30)?;
    out.write_str("gender")?;
    out.write_str("female")?;
    let len = out.len();

    let mut unpacker = Unpacker::new(&storage[..len]);
    let map_len = unpacker.read_map_len()?;
    println!("map len: {map_len}");

    let mut key_buf = [0u8; 8];
    let mut value = [0u8; 8];
    let mut entries = Vec::with_capacity(map_len as usize);
    for _ in 0..map_len {
        let key = unpacker.read_str(&mut key_buf)?;
        let rendered = match unpacker.peek()?.family {
            Family::Str => format!("\"{}\"", unpacker.read_str(&mut value)?),
            _ => unpacker.read_int()?.to_string(),
        };
        entries.push(format!("\"{key}\":{rendered}"));
    }
    println!("[{}]", entries.join(", "));

    Ok(())
}
