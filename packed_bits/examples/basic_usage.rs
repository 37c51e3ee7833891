use packed_bits::{PackedBitArray, PackedBitsError};

fn main() {
    println!("=== Packed Bit Array Examples ===\n");

    // Example 1: Storing small integers
    let _ = example_small_integers();

    // Example 2: Allocation failure and release
    example_validity();

    // Example 3: Memory comparison
    let _ = example_memory_savings();

    // Example 4: Sending the raw bytes
    let _ = example_transmit();
}

fn example_small_integers() -> Result<(), PackedBitsError> {
    println!("Example 1: Storing RGB color indices (5 bits each)");

    let mut colors = PackedBitArray::new(3, 5)?;

    // Store palette indices (0-31)
    colors.set(0, 15)?; // Red shade
    colors.set(1, 8)?; // Green shade
    colors.set(2, 23)?; // Blue shade

    println!("  Stored {} colors in {} bytes", colors.len(), colors.byte_len());
    for (i, color) in colors.iter().enumerate() {
        println!("  Color {}: {}", i, color);
    }

    if let Err(err) = colors.set(0, 32) {
        println!("  Rejected: {}", err);
    }
    println!();

    Ok(())
}

fn example_validity() {
    println!("Example 2: Allocation validity");

    let array = PackedBitArray::alloc(16, 4);
    println!("  alloc(16, 4) valid: {}", array.is_valid());

    let bad = PackedBitArray::alloc(16, 0);
    println!("  alloc(16, 0) valid: {}", bad.is_valid());

    let released = array.release();
    println!("  after release valid: {}", released.is_valid());
    println!();
}

fn example_memory_savings() -> Result<(), PackedBitsError> {
    println!("Example 3: Memory savings comparison");

    let count = 10_000;

    // Standard Vec<u32>
    let standard_bytes = count * 4;

    // 12-bit elements (values 0-4095)
    let mut packed = PackedBitArray::new(count, 12)?;
    for i in 0..count {
        packed.set(i, i as u64 % 4096)?;
    }
    let packed_bytes = packed.byte_len();

    let savings = 100.0 * (1.0 - (packed_bytes as f64 / standard_bytes as f64));

    println!("  Storing {} 12-bit values:", count);
    println!("  Vec<u32>: {} bytes", standard_bytes);
    println!("  Packed:   {} bytes", packed_bytes);
    println!("  Savings:  {:.1}%", savings);
    println!();

    Ok(())
}

fn example_transmit() -> Result<(), PackedBitsError> {
    println!("Example 4: Transmitting packed bytes");

    let sender = PackedBitArray::from_values(3, &[7, 0, 5, 3])?;
    let wire = sender.as_bytes().to_vec();
    println!("  Wire bytes: {:02X?}", wire);

    let receiver = PackedBitArray::from_bytes(&wire, 4, 3)?;
    println!("  Received:   {:?}", receiver.iter().collect::<Vec<_>>());

    Ok(())
}
