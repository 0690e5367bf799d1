#![no_main]
use libfuzzer_sys::fuzz_target;
use meetgrid_libs::{key::parse_slot_key, EventWindow};

fuzz_target!(|window: EventWindow| {
    #[cfg(feature = "log")]
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply();

    let slots = window.time_slots();

    for day in window.days() {
        let (open, close) = window.day_bounds(day);
        let day_slots = slots
            .iter()
            .filter(|slot| slot.start >= open && slot.start < close)
            .count();

        assert!(
            slots
                .iter()
                .filter(|slot| slot.start >= open && slot.start < close)
                .all(|slot| slot.end <= close),
            "Slot runs past the close of {}",
            day
        );

        if close <= open {
            assert_eq!(day_slots, 0, "Closed day {} has slots", day);
        }
    }

    for pair in slots.windows(2) {
        assert!(
            pair[0].start < pair[1].start,
            "Slots out of order: {} then {}",
            pair[0].key,
            pair[1].key
        );
    }

    for slot in slots.iter() {
        assert_eq!(parse_slot_key(&slot.key), Ok(slot.start), "Key does not round trip");
    }
});
