use std::time::Duration;

use maze_chase_core::{Direction, MovingObject, PixelPoint, Position, CELL_SIZE};
use maze_chase_system_movement::{advance, Kinematics};

fn walker(from: PixelPoint, to: PixelPoint) -> MovingObject {
    let mut object = MovingObject::resting_at(from, Direction::Right);
    object.set_target(to);
    object
}

#[test]
fn resolves_horizontal_axis_before_vertical() {
    let mut object = walker(PixelPoint::new(60, 60), PixelPoint::new(100, 140));
    let kinematics = Kinematics::default();

    for _ in 0..10 {
        advance(&mut object, kinematics);
        assert_eq!(object.position().y(), 60.0, "vertical axis moved early");
    }
    assert_eq!(object.position().truncated(), PixelPoint::new(100, 60));
    assert_eq!(object.facing(), Direction::Right);

    advance(&mut object, kinematics);
    assert_eq!(object.position().truncated(), PixelPoint::new(100, 64));
    assert_eq!(object.facing(), Direction::Down);
}

#[test]
fn never_changes_both_axes_in_one_step() {
    let mut object = walker(PixelPoint::new(300, 20), PixelPoint::new(20, 260));
    let kinematics = Kinematics::default();

    while !object.at_target() {
        let before = object.position();
        advance(&mut object, kinematics);
        let after = object.position();
        let x_changed = before.x() != after.x();
        let y_changed = before.y() != after.y();
        assert!(x_changed ^ y_changed, "expected exactly one axis to move");
    }
}

#[test]
fn converges_without_overshooting() {
    let kinematics = Kinematics::new(Duration::from_millis(50), 70.0);
    let from = PixelPoint::new(20, 20);
    let to = PixelPoint::new(20 + 7 * CELL_SIZE, 20);
    let mut object = walker(from, to);

    let distance = f64::from(to.x() - from.x());
    let bound = (distance / kinematics.max_distance()).ceil() as usize;
    let mut ticks = 0;
    while !object.at_target() {
        advance(&mut object, kinematics);
        ticks += 1;
        assert!(object.position().x() <= f64::from(to.x()), "overshot the target");
        assert!(ticks <= bound, "took more than {bound} ticks");
    }
    assert_eq!(object.position().x(), f64::from(to.x()));
}

#[test]
fn faces_left_and_up_when_moving_backwards() {
    let mut object = walker(PixelPoint::new(140, 140), PixelPoint::new(100, 100));
    let kinematics = Kinematics::default();

    advance(&mut object, kinematics);
    assert_eq!(object.facing(), Direction::Left);
    assert_eq!(object.position(), Position::new(136.0, 140.0));

    for _ in 0..9 {
        advance(&mut object, kinematics);
    }
    advance(&mut object, kinematics);
    assert_eq!(object.facing(), Direction::Up);
    assert_eq!(object.position(), Position::new(100.0, 136.0));
}

#[test]
fn resting_object_does_not_move_or_turn() {
    let mut object = MovingObject::resting_at(PixelPoint::new(60, 60), Direction::Up);
    advance(&mut object, Kinematics::default());
    assert_eq!(object.position(), Position::new(60.0, 60.0));
    assert_eq!(object.facing(), Direction::Up);
}
