//! Unit tests for rd-core primitives.

#[cfg(test)]
mod ids {
    use crate::{FacilityId, UnitId};

    #[test]
    fn ordering() {
        assert!(UnitId(1) < UnitId(2));
        assert!(FacilityId(100) > FacilityId(99));
    }

    #[test]
    fn display() {
        assert_eq!(UnitId(7).to_string(), "unit#7");
        assert_eq!(FacilityId(3).to_string(), "facility#3");
    }

    #[test]
    fn parse_from_path_segment() {
        assert_eq!(" 42 ".parse::<FacilityId>().unwrap(), FacilityId(42));
        assert!("abc".parse::<UnitId>().is_err());
        assert!("-1".parse::<UnitId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&UnitId(5)).unwrap(), "5");
        let id: FacilityId = serde_json::from_str("9").unwrap();
        assert_eq!(id, FacilityId(9));
    }
}

#[cfg(test)]
mod geo {
    use crate::{CoreError, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(9.0765, 7.3986);
        assert_eq!(p.distance_m(p), 0.0);
        assert_eq!(p.distance_m_rounded(p), 0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2πR / 360 = 111_194.93 m
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        assert_eq!(a.distance_m_rounded(b), 111_195);
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(6.4550, 3.3941);
        let b = GeoPoint::new(9.0579, 7.4951);
        assert_eq!(a.distance_m(b), b.distance_m(a));
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let half = std::f64::consts::PI * crate::EARTH_RADIUS_M;
        assert!((a.distance_m(b) - half).abs() < 1e-6);
    }

    #[test]
    fn abuja_unit_distance() {
        // Abuja facility to a unit ~11 km east-south-east.
        let facility = GeoPoint::new(9.0765, 7.3986);
        let unit = GeoPoint::new(9.0579, 7.4951);
        let d = facility.distance_m_rounded(unit);
        assert_eq!(d, 10_796);
    }

    #[test]
    fn try_new_accepts_bounds() {
        assert!(GeoPoint::try_new(90.0, 180.0).is_ok());
        assert!(GeoPoint::try_new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::try_new(0.0, 0.0).is_ok());
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert_eq!(
            GeoPoint::try_new(200.0, 1.0),
            Err(CoreError::InvalidCoordinate { field: "latitude", value: 200.0 })
        );
        assert!(matches!(
            GeoPoint::try_new(1.0, -180.5),
            Err(CoreError::InvalidCoordinate { field: "longitude", .. })
        ));
    }

    #[test]
    fn try_new_rejects_non_finite() {
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::try_new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn parse_text() {
        assert_eq!(GeoPoint::parse(" 9.05 ", "7.49").unwrap(), GeoPoint::new(9.05, 7.49));
        assert!(matches!(
            GeoPoint::parse("north", "7.49"),
            Err(CoreError::Parse { field: "latitude", .. })
        ));
        assert!(GeoPoint::parse("NaN", "1").is_err());
        assert!(GeoPoint::parse("inf", "1").is_err());
    }

    #[test]
    fn unit_vectors_have_unit_length() {
        for p in [GeoPoint::new(0.0, 0.0), GeoPoint::new(45.0, 90.0), GeoPoint::new(-89.9, -170.0)] {
            let [x, y, z] = p.to_unit_vector();
            assert!(((x * x + y * y + z * z) - 1.0).abs() < 1e-12);
        }
    }
}

#[cfg(test)]
mod model {
    use chrono::TimeZone;

    use crate::{
        FacilityId, GeoPoint, MobileUnit, NearestUnit, ProximityResult, UnitId, UnitStatus,
    };

    #[test]
    fn status_text_round_trip() {
        assert_eq!("available".parse::<UnitStatus>().unwrap(), UnitStatus::Available);
        assert_eq!("unavailable".parse::<UnitStatus>().unwrap(), UnitStatus::Unavailable);
        assert!("busy".parse::<UnitStatus>().is_err());
        assert_eq!(UnitStatus::Unavailable.to_string(), "unavailable");
        assert!(UnitStatus::default().is_available());
    }

    #[test]
    fn proximity_result_wire_shape() {
        let result = ProximityResult {
            facility_id: FacilityId(2),
            nearest_unit: NearestUnit {
                id:              UnitId(2),
                identifier:      "AMB-002".into(),
                distance_meters: 10_796,
                position:        GeoPoint::new(9.0579, 7.4951),
            },
            computed_at: chrono::Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "facilityId": 2,
                "nearestUnit": {
                    "id": 2,
                    "identifier": "AMB-002",
                    "distanceMeters": 10796,
                    "latitude": 9.0579,
                    "longitude": 7.4951
                },
                "computedAt": "2025-01-02T03:04:05Z"
            })
        );

        let back: ProximityResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn unit_to_position_keeps_identity() {
        let unit = MobileUnit {
            id:         UnitId(4),
            identifier: "AMB-004".into(),
            position:   GeoPoint::new(4.8417, 7.0025),
            status:     UnitStatus::Available,
            updated_at: Default::default(),
        };
        let p = unit.to_position();
        assert_eq!(p.id, UnitId(4));
        assert_eq!(p.identifier, "AMB-004");
        assert_eq!(p.position, unit.position);
    }
}

#[cfg(test)]
mod clock {
    use chrono::TimeDelta;

    use crate::{Clock, ManualClock};

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::at_epoch();
        let t0 = clock.now();
        assert_eq!(clock.now(), t0);
        clock.advance(TimeDelta::seconds(300));
        assert_eq!(clock.now() - t0, TimeDelta::seconds(300));
    }

    #[test]
    fn arc_clock_delegates() {
        let clock = std::sync::Arc::new(ManualClock::at_epoch());
        let shared = clock.clone();
        clock.advance(TimeDelta::seconds(1));
        assert_eq!(shared.now(), clock.now());
    }
}
