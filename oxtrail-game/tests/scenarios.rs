use oxtrail_game::{
    Ending, EventCategory, EventDescriptor, EventDirector, EventEffect, EventHandler,
    EventOutcome, EventTarget, ExecutionMode, GameContext, ItemCatalog, ItemCategory,
    LEADER_DEATH_EVENT, ModeType, Person, SimConfig, SimError, SimResult, SimRng, Simulation,
    TargetKind, TemplatedEvent, VehicleStatus,
};
use rand::RngCore;
use rand::rngs::mock::StepRng;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const DAY: Duration = Duration::from_secs(1);

/// Vehicle event that knocks 200 miles off the day and records what it saw.
struct Washout {
    seen: Arc<Mutex<Vec<i32>>>,
}

impl EventHandler for Washout {
    fn target_kind(&self) -> TargetKind {
        TargetKind::Vehicle
    }

    fn execute(
        &self,
        target: &mut EventTarget<'_>,
        _rng: &mut dyn RngCore,
    ) -> SimResult<EventOutcome> {
        let EventTarget::Vehicle(vehicle) = target else {
            unreachable!("director checks the target kind");
        };
        let mut seen = self.seen.lock().unwrap();
        seen.push(vehicle.mileage());
        vehicle.reduce_mileage(200);
        seen.push(vehicle.mileage());
        Ok(EventOutcome {
            applied: true,
            ..EventOutcome::default()
        })
    }

    fn render(&self, _outcome: &EventOutcome) -> String {
        "A washout swallows the road.".to_string()
    }
}

fn context(config: SimConfig, director: EventDirector) -> GameContext {
    let mut ctx = GameContext::new(
        config,
        ItemCatalog::bundled().unwrap(),
        director,
        SimRng::from_rng(StepRng::new(0, 0)),
    )
    .unwrap();
    ctx.vehicle.board(Person::new("Ada", true)).unwrap();
    ctx.vehicle.board(Person::new("Ben", false)).unwrap();
    ctx.vehicle.board(Person::new("Cy", false)).unwrap();
    for (category, amount) in [
        (ItemCategory::Food, 200),
        (ItemCategory::Clothes, 2),
        (ItemCategory::Animal, 1),
    ] {
        let item = ctx.vehicle.item(category).unwrap().transaction(amount);
        ctx.vehicle.add_item(&item);
    }
    ctx
}

/// One ox is worth $20, so a pivot of 20 cancels the animal term.
fn flat_mileage(base: f64) -> SimConfig {
    SimConfig {
        base_mileage: base,
        animal_investment_pivot: 20.0,
        mileage_noise_max: 0,
        bad_luck_chance: 0.0,
        ..SimConfig::default()
    }
}

#[test]
fn event_reduced_mileage_floors_then_lifts_to_the_minimum() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut director = EventDirector::new();
    director
        .register(EventDescriptor::new(
            "washout",
            EventCategory::Vehicle,
            ExecutionMode::Automatic,
            1,
            Washout {
                seen: Arc::clone(&seen),
            },
        ))
        .unwrap();
    let mut sim = Simulation::with_context(context(flat_mileage(150.0), director)).unwrap();
    assert_eq!(sim.context().vehicle.living_count(), 3);

    sim.send_input("continue").unwrap();
    assert_eq!(sim.context().vehicle.status(), VehicleStatus::Moving);
    sim.on_tick(DAY).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![150, 0]);
    assert_eq!(sim.context().vehicle.mileage(), 10);
    assert_eq!(sim.context().vehicle.odometer(), 10);
    assert_eq!(sim.context().vehicle.living_count(), 3);
    assert_eq!(sim.modes().active_type(), Some(ModeType::RandomEvent));
    assert!(sim.display_text().starts_with("A washout swallows the road."));
}

#[test]
fn menu_keys_ignore_case() {
    let mut sim =
        Simulation::with_context(context(SimConfig::default(), EventDirector::new())).unwrap();
    sim.send_input("sToRe").unwrap();
    assert_eq!(sim.modes().active_type(), Some(ModeType::Store));
}

#[test]
fn active_state_swallows_menu_keys() {
    let mut sim =
        Simulation::with_context(context(SimConfig::default(), EventDirector::new())).unwrap();
    sim.send_input("rest").unwrap();
    sim.send_input("store").unwrap();
    assert_eq!(sim.modes().active_type(), Some(ModeType::Travel));
    assert!(sim.display_text().contains("from 1 to 9"));
}

#[test]
fn unknown_input_is_ignored() {
    let mut sim =
        Simulation::with_context(context(SimConfig::default(), EventDirector::new())).unwrap();
    let before = sim.display_text();
    sim.send_input("fly to the moon").unwrap();
    sim.send_input("42").unwrap();
    assert_eq!(sim.display_text(), before);
}

#[test]
fn leader_death_routes_to_game_over() {
    let mut sim =
        Simulation::with_context(context(flat_mileage(20.0), EventDirector::new())).unwrap();
    sim.send_input("continue").unwrap();
    sim.context_mut().vehicle.passenger_mut(0).unwrap().kill();
    sim.on_tick(DAY).unwrap();

    let ending = sim.context().ending.clone();
    let Some(Ending::LeaderDied(report)) = &ending else {
        panic!("expected the leader-death ending, got {ending:?}");
    };
    assert_eq!(report.event_id, LEADER_DEATH_EVENT);
    assert_eq!(sim.modes().active_type(), Some(ModeType::GameOver));
    assert!(sim.display_text().contains("Ada, who led the wagon, has died"));

    let day = sim.context().day;
    sim.on_tick(DAY).unwrap();
    assert_eq!(sim.context().day, day);

    sim.send_input("").unwrap();
    assert!(sim.is_closed());
}

#[test]
fn events_are_read_before_the_ending() {
    let mut director = EventDirector::new();
    director
        .register(EventDescriptor::new(
            "mud",
            EventCategory::Vehicle,
            ExecutionMode::Automatic,
            1,
            TemplatedEvent::new(
                "mud",
                EventEffect::ReduceMileage { min: 1, max: 1 },
                "Deep mud.",
                None,
            ),
        ))
        .unwrap();
    let config = SimConfig {
        trail_length: 5,
        ..flat_mileage(20.0)
    };
    let mut sim = Simulation::with_context(context(config, director)).unwrap();
    sim.send_input("continue").unwrap();
    sim.on_tick(DAY).unwrap();

    assert_eq!(sim.modes().active_type(), Some(ModeType::RandomEvent));
    sim.send_input("").unwrap();
    sim.on_tick(Duration::ZERO).unwrap();
    assert_eq!(sim.modes().active_type(), Some(ModeType::GameOver));
    assert!(sim.display_text().contains("end of the trail"));
}

#[test]
fn pulses_wait_for_a_full_interval() {
    let mut sim =
        Simulation::with_context(context(flat_mileage(20.0), EventDirector::new())).unwrap();
    sim.send_input("continue").unwrap();
    for _ in 0..9 {
        sim.on_tick(Duration::from_millis(100)).unwrap();
    }
    assert_eq!(sim.context().day, 0);
    sim.on_tick(Duration::from_millis(100)).unwrap();
    assert_eq!(sim.context().day, 1);
    assert_eq!(sim.context().vehicle.odometer(), 20);
}

#[test]
fn leader_death_event_refuses_a_follower() {
    let director = EventDirector::bundled().unwrap();
    let mut follower = Person::new("Ben", false);
    let mut rng = StepRng::new(0, 0);
    let err = director
        .trigger_event(LEADER_DEATH_EVENT, EventTarget::Person(&mut follower), &mut rng)
        .unwrap_err();
    assert!(matches!(err, SimError::NotLeader { .. }));
    assert!(follower.is_alive());
}
