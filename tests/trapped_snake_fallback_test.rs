// Integration test for trapped snake fallback behavior
//
// When no direction is open the selector still answers. It prefers the
// first illegal direction in RIGHT, UP, LEFT, DOWN order, even when that
// move runs into a wall or off the board. These tests pin that behavior
// down so any change to it is a conscious one.

use snakego_bot::bot::{Bot, MoveClass};
use snakego_bot::config::Config;
use snakego_bot::types::{Action, Context, Coord, Item, Snake};

fn snake(id: i32, body: &[(i32, i32)]) -> Snake {
    Snake {
        id,
        coord_list: body.iter().map(|&(x, y)| Coord { x, y }).collect(),
        railgun_item: None,
    }
}

/// Test: single cell board, every direction leaves the grid
#[test]
fn test_one_cell_board_returns_right() {
    let bot = Bot::new(Config::default_hardcoded());
    let mut ctx = Context::empty(1, 1, 1);
    let me = snake(1, &[(0, 0)]);
    ctx.add_snake(me.clone(), true);

    assert_eq!(bot.classify_moves(&me, &ctx), [MoveClass::Illegal; 4]);
    // Off-board RIGHT is the documented last resort, not a safe move
    assert_eq!(bot.decide(&me, &ctx), Action::MoveRight);
}

/// Test: corner at (0,0) with walls on the two in-bounds sides
#[test]
fn test_walled_corner_picks_first_illegal() {
    let bot = Bot::new(Config::default_hardcoded());
    let mut ctx = Context::empty(5, 5, 1);
    ctx.wall_map[1][0] = 0;
    ctx.wall_map[0][1] = 0;
    let me = snake(1, &[(0, 0)]);
    ctx.add_snake(me.clone(), true);

    assert_eq!(bot.classify_moves(&me, &ctx), [MoveClass::Illegal; 4]);
    assert_eq!(bot.decide(&me, &ctx), Action::MoveRight);
}

/// Test: boxed in by another snake and walls; the pick walks straight into a wall
#[test]
fn test_boxed_in_secondary_still_answers() {
    let bot = Bot::new(Config::default_hardcoded());
    let mut ctx = Context::empty(5, 5, 12);
    ctx.add_snake(snake(1, &[(4, 4)]), true);
    // enemy on the right, walls up and left, neck below
    ctx.add_snake(snake(7, &[(3, 2), (3, 1)]), false);
    ctx.wall_map[2][3] = 1;
    ctx.wall_map[1][2] = 1;
    let me = snake(2, &[(2, 2), (2, 1), (2, 0)]);
    ctx.add_snake(me.clone(), true);

    assert_eq!(bot.classify_moves(&me, &ctx), [MoveClass::Illegal; 4]);
    let action = bot.decide(&me, &ctx);
    assert_eq!(action, Action::MoveRight);
}

/// Test: a boxed-in primary with a live item still falls back instead of chasing
#[test]
fn test_boxed_in_primary_with_item_falls_back() {
    let bot = Bot::new(Config::default_hardcoded());
    let mut ctx = Context::empty(5, 5, 3);
    ctx.wall_map[1][0] = 0;
    let me = snake(1, &[(0, 0), (0, 1), (0, 2)]);
    ctx.add_snake(me.clone(), true);
    ctx.item_list.push(Item {
        id: 0,
        x: 4,
        y: 0,
        time: 3,
        kind: 0,
        param: 2,
    });

    assert_eq!(bot.classify_moves(&me, &ctx), [MoveClass::Illegal; 4]);
    assert_eq!(bot.decide(&me, &ctx), Action::MoveRight);
}

/// Test: trapped except for an own-body cell; the secondary snake closes the loop
#[test]
fn test_only_solidify_left_for_secondary() {
    let bot = Bot::new(Config::default_hardcoded());
    let mut ctx = Context::empty(3, 3, 5);
    ctx.add_snake(snake(1, &[(2, 2)]), true);
    // Head in the corner, neck above, body to the right
    let me = snake(2, &[(0, 0), (0, 1), (1, 1), (1, 0)]);
    ctx.add_snake(me.clone(), true);

    assert_eq!(
        bot.classify_moves(&me, &ctx),
        [
            MoveClass::Solidify,
            MoveClass::Illegal,
            MoveClass::Illegal,
            MoveClass::Illegal
        ]
    );
    assert_eq!(bot.decide(&me, &ctx), Action::MoveRight);
}

/// Test: the primary never solidifies on purpose; with only a solidify move
/// and an illegal one, the fallback picks the illegal one
#[test]
fn test_primary_with_only_solidify_picks_illegal() {
    let bot = Bot::new(Config::default_hardcoded());
    let mut ctx = Context::empty(3, 3, 5);
    let me = snake(1, &[(0, 0), (0, 1), (1, 1), (1, 0)]);
    ctx.add_snake(me.clone(), true);

    // RIGHT is solidify, UP is the neck: first illegal in order is UP
    assert_eq!(bot.decide(&me, &ctx), Action::MoveUp);
}
