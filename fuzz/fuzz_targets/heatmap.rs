#![no_main]
use chrono::DateTime;
use libfuzzer_sys::fuzz_target;
use meetgrid_libs::{calculate_heatmap, intensity_bucket, slot_key, AvailabilityRow, Intensity};

fuzz_target!(|data: Vec<(u16, u8)>| {
    // quarter hours from an arbitrary epoch, and one of 256 names
    let rows: Vec<AvailabilityRow> = data
        .iter()
        .filter_map(|&(slot, name)| {
            DateTime::from_timestamp(1_700_000_000 + i64::from(slot) * 900, 0)
                .map(|start| AvailabilityRow::new(start, &name.to_string()))
        })
        .collect();

    let heatmap = calculate_heatmap(&rows);
    let max = heatmap.max_count();

    assert_eq!(
        heatmap.iter().map(|(_, entry)| entry.count as usize).sum::<usize>(),
        rows.len(),
        "Every row is counted once"
    );

    for (key, entry) in heatmap.iter() {
        assert_eq!(entry.count as usize, entry.participants.len());
        assert!(entry.count >= 1 && entry.count <= max);
        assert_ne!(intensity_bucket(entry.count, max), Intensity::None);

        let expected: Vec<&str> = rows
            .iter()
            .filter(|row| slot_key(&row.slot_start) == key)
            .map(|row| row.participant_name.as_str())
            .collect();
        assert_eq!(entry.participants, expected, "Participants out of submission order");
    }
});
