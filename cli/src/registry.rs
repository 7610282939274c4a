use crate::scenario::Scenario;

/// Every scenario this tool knows about, in the order they are processed.
pub fn scenarios() -> Vec<Scenario> {
    let runs = || 1..=10;
    let distances = || (10..180).step_by(5);
    vec![
        // fixed-length highway, car count follows from the distance
        Scenario::new(
            "car-relay",
            vec!["--fixedDistance=10000".to_string()],
            runs(),
            distances(),
        ),
        // simulator default of 1000 cars
        Scenario::new("car-relay-1000-cars", vec![], runs(), distances()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let scenarios = scenarios();
        let names: HashSet<_> = scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), scenarios.len());
        assert!(!names.contains(crate::runner::ALL));
    }

    #[test]
    fn car_relay_sweep() {
        let scenarios = scenarios();
        let car_relay = &scenarios[0];
        assert_eq!(car_relay.name, "car-relay");
        assert_eq!(car_relay.runs, (1..=10).collect::<Vec<_>>());
        assert_eq!(car_relay.distances.first(), Some(&10));
        assert_eq!(car_relay.distances.last(), Some(&175));
        assert_eq!(car_relay.distances.len(), 34);
    }
}
