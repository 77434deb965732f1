//! Disclosure Tests
//!
//! What a requesting clinic can see after a grant:
//! - Judgment Shield: private notes never leave the owning clinic
//! - Switching Shield: contributing clinic hidden unless unmasked and allowed
//! - Depth layering of clinical detail
//! - No view at all without a granted request

#[cfg(test)]
mod scenarios {
    use crate::{draft, engine_with, request};
    use continuity_exchange_engine::{
        ExchangeError, HistoryDepth, OptInMode, OriginVisibility, SharedExchange,
    };

    /// Notes held by the clinics that contributed the seed encounters
    const SEED_NOTES: [&str; 2] = [
        "Patient mentioned stress at work affecting recovery. Consider referral to counseling.",
        "Competing in local tennis league, very motivated.",
    ];

    /// Private notes stay out of every view, including our own published ones
    #[test]
    fn judgment_shield_holds_at_every_depth() {
        let mut engine = engine_with(OptInMode::OptInFull, 10);
        engine.set_origin_visibility(OriginVisibility::VisibleIfAllowed);
        let published = engine.publish_encounter(draft(HistoryDepth::Full)).unwrap();
        assert!(published.redact_private_note);

        let mut notes: Vec<&str> = SEED_NOTES.to_vec();
        notes.push(published.private_note.as_str());

        for depth in HistoryDepth::ALL {
            for patient_id in ["p1", "p2"] {
                assert!(engine.request_history(&request(patient_id, depth)).allowed);
                let views = engine.history_view(patient_id).unwrap();
                assert!(!views.is_empty());
                let json = serde_json::to_string(&views).unwrap();
                for note in &notes {
                    assert!(!json.contains(*note), "note leaked at {}", depth);
                }
            }
        }
    }

    /// Full records are handed out for our own encounters only
    #[test]
    fn other_clinics_records_never_returned() {
        let mut engine = engine_with(OptInMode::OptInFull, 0);
        assert!(engine.own_encounters().is_empty());
        for id in ["e1", "e2"] {
            assert!(matches!(engine.encounter(id), Err(ExchangeError::UnknownEncounter(_))));
        }

        let published = engine.publish_encounter(draft(HistoryDepth::Summary)).unwrap();
        let own = engine.own_encounters();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].id, published.id);
        assert_eq!(engine.encounter(&published.id).unwrap().private_note, published.private_note);

        let shared = SharedExchange::new(engine);
        let own = shared.own_encounters().unwrap();
        let entries = serde_json::to_string(&shared.audit_entries().unwrap()).unwrap();
        for note in SEED_NOTES {
            assert!(own.iter().all(|e| e.private_note != note));
            assert!(!entries.contains(note));
        }
    }

    /// An opted-out clinic with no credits cannot read anything
    #[test]
    fn ungranted_view_refused() {
        let mut engine = engine_with(OptInMode::OptedOut, 0);
        assert!(matches!(engine.history_view("p1"), Err(ExchangeError::NoGrant(_))));
        assert!(engine.audit_log().is_empty());

        assert!(!engine.request_history(&request("p1", HistoryDepth::Full)).allowed);
        assert!(matches!(engine.history_view("p1"), Err(ExchangeError::NoGrant(_))));

        engine.set_opt_in_mode(OptInMode::OptInFull);
        assert!(!engine.request_history(&request("p1", HistoryDepth::Full)).allowed);
        assert!(matches!(engine.history_view("p1"), Err(ExchangeError::NoGrant(_))));
        assert_eq!(engine.settings().credits, 0);
    }

    /// A grant for one patient opens nothing for another
    #[test]
    fn grant_is_per_patient() {
        let mut engine = engine_with(OptInMode::OptInFull, 0);
        assert!(engine.request_history(&request("p2", HistoryDepth::Glance)).allowed);
        assert!(engine.history_view("p2").is_ok());
        assert!(matches!(engine.history_view("p1"), Err(ExchangeError::NoGrant(_))));
    }

    /// Seed e1 is masked; p1 also forbids showing the origin
    #[test]
    fn masked_origin_hidden() {
        let mut engine = engine_with(OptInMode::OptInFull, 2);
        assert!(engine.request_history(&request("p1", HistoryDepth::Full)).allowed);
        let views = engine.history_view("p1").unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].source_clinic, None);
    }

    /// Seed e2 is unmasked and p2 allows the origin to be shown
    #[test]
    fn unmasked_origin_shown_when_patient_allows() {
        let mut engine = engine_with(OptInMode::OptInFull, 0);
        assert!(engine.request_history(&request("p2", HistoryDepth::Glance)).allowed);
        let views = engine.history_view("p2").unwrap();
        assert_eq!(views[0].source_clinic.as_deref(), Some("Athletic Recovery Clinic"));
    }

    /// Unmasked record for a patient who withholds permission stays shielded
    #[test]
    fn patient_permission_required_for_origin() {
        let mut engine = engine_with(OptInMode::OptInFull, 0);
        engine.set_origin_visibility(OriginVisibility::VisibleIfAllowed);
        let published = engine.publish_encounter(draft(HistoryDepth::Full)).unwrap();
        assert!(!published.source_clinic_masked);

        assert!(engine.request_history(&request("p1", HistoryDepth::Full)).allowed);
        let view = engine
            .history_view("p1")
            .unwrap()
            .into_iter()
            .find(|v| v.encounter_id == published.id)
            .unwrap();
        assert_eq!(view.source_clinic, None);
    }

    /// View depth follows what the gate granted
    #[test]
    fn granted_depth_drives_view() {
        let mut engine = engine_with(OptInMode::OptInBasic, 2);
        let result = engine.request_history(&request("p1", HistoryDepth::Full));
        assert_eq!(result.granted_depth, Some(HistoryDepth::Summary));

        let views = engine.history_view("p1").unwrap();
        let view = &views[0];
        assert_eq!(view.depth, HistoryDepth::Summary);
        assert_eq!(view.summary.as_ref().unwrap().diagnosis, "Lumbar Disc Herniation");
        assert!(view.full.is_none(), "outcomes need full depth");
    }

    #[test]
    fn newest_published_first() {
        let mut engine = engine_with(OptInMode::OptInFull, 0);
        let published = engine.publish_encounter(draft(HistoryDepth::Glance)).unwrap();
        assert!(engine.request_history(&request("p1", HistoryDepth::Glance)).allowed);

        let views = engine.history_view("p1").unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].encounter_id, published.id);
        assert_eq!(views[1].encounter_id, "e1");
    }

    #[test]
    fn no_history_for_unknown_patient() {
        let mut engine = engine_with(OptInMode::OptInFull, 0);
        let result = engine.request_history(&request("p-unknown", HistoryDepth::Glance));
        assert!(result.allowed);
        assert!(engine.history_view("p-unknown").unwrap().is_empty());
    }
}
