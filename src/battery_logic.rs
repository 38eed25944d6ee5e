/// Convert a raw SAADC count into cell millivolts, undoing the VBAT divider.
pub fn millivolts_from_raw(raw: i16, full_scale_mv: u32, max_count: u32, divider: u32) -> u16 {
    // Single-ended inputs can read slightly negative around 0 V.
    let raw = raw.max(0) as u32;
    let mv = raw * full_scale_mv / max_count * divider;
    mv.min(u16::MAX as u32) as u16
}

/// Map a cell voltage onto a state of charge using a descending
/// `(millivolts, percent)` curve, interpolating between points.
///
/// Voltages above the first point clamp to its percent, below the last
/// point to the last percent. An empty curve reports 0.
pub fn percent_from_millivolts(mv: u16, curve: &[(u16, u8)]) -> u8 {
    let (Some(&(top_mv, top_pct)), Some(&(_, bottom_pct))) = (curve.first(), curve.last()) else {
        return 0;
    };

    if mv >= top_mv {
        return top_pct.min(100);
    }

    for pair in curve.windows(2) {
        let (hi_mv, hi_pct) = pair[0];
        let (lo_mv, lo_pct) = pair[1];
        if mv >= lo_mv && hi_mv > lo_mv {
            let span_mv = (hi_mv - lo_mv) as u32;
            let span_pct = hi_pct.saturating_sub(lo_pct) as u32;
            let offset = (mv - lo_mv) as u32;
            let pct = lo_pct as u32 + offset * span_pct / span_mv;
            return pct.min(100) as u8;
        }
    }

    bottom_pct.min(100)
}
