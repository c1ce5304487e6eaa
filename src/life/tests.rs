// src/life/tests.rs

mod engine_tests {
    use crate::display::mock::{MockScreen, ScreenCall};
    use crate::life::*;
    use std::collections::HashSet;
    use test_log::test; // For logging within tests

    /// Builds a grid from ASCII rows: `#` for alive, `.` for dead.
    fn grid_from_rows(rows: &[&str]) -> Vec<Vec<bool>> {
        rows.iter()
            .map(|row| row.bytes().map(|b| b == b'#').collect())
            .collect()
    }

    /// Renders the engine's current generation back to ASCII rows.
    fn snapshot(engine: &GameOfLife) -> Vec<String> {
        (0..engine.height())
            .map(|row| {
                (0..engine.width())
                    .map(|col| if engine.is_alive(row, col) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    /// Asserts that `calls` is exactly one displayed frame: one `SetPixel`
    /// per grid cell, each coordinate exactly once, followed by a single
    /// `Refresh`.
    fn assert_full_frame(calls: &[ScreenCall], width: usize, height: usize) {
        assert_eq!(calls.len(), width * height + 1);

        let (pixels, tail) = calls.split_at(width * height);
        let mut seen = HashSet::new();
        for call in pixels {
            match call {
                ScreenCall::SetPixel { row, col, .. } => {
                    assert!(*row < height && *col < width, "pixel outside grid");
                    assert!(seen.insert((*row, *col)), "cell plotted twice in one frame");
                }
                ScreenCall::Refresh => panic!("refresh before all cells were plotted"),
            }
        }
        assert_eq!(tail, &[ScreenCall::Refresh]);
    }

    #[test]
    fn rejects_empty_and_ragged_initial_states() {
        let mut screen = MockScreen::new();
        assert!(GameOfLife::new(&[], &mut screen).is_err());

        let mut screen = MockScreen::new();
        let ragged = vec![vec![false, true], vec![false]];
        assert!(GameOfLife::new(&ragged, &mut screen).is_err());
    }

    #[test]
    fn toroidal_neighbors_wrap_at_corners_and_edges() {
        let mut screen = MockScreen::new();
        let initial = grid_from_rows(&[
            "..#", //
            "...", //
            "#.#",
        ]);
        let engine = GameOfLife::new(&initial, &mut screen).unwrap();

        // (0,0) sees (2,2), (2,0) and (0,2) across the edges.
        assert_eq!(engine.live_neighbors(0, 0), 3);
        // On a 3x3 torus every cell borders every other cell, so the center
        // sees all three as well.
        assert_eq!(engine.live_neighbors(1, 1), 3);
        // A live cell reaches the other two but never counts itself.
        assert_eq!(engine.live_neighbors(0, 2), 2);
    }

    #[test]
    fn single_cell_grid_collapses_to_the_empty_fixed_point() {
        let mut screen = MockScreen::new();
        let mut engine = GameOfLife::new(&grid_from_rows(&["#"]), &mut screen).unwrap();

        // Every wrapped position lands on the cell itself, so it has no
        // neighbors at all and starves.
        assert_eq!(engine.live_neighbors(0, 0), 0);
        assert!(!engine.show_generation().unwrap());
        assert!(!engine.is_alive(0, 0));
        assert!(engine.show_generation().unwrap());
    }

    #[test]
    fn isolated_cell_dies_of_under_population() {
        let mut screen = MockScreen::new();
        let initial = grid_from_rows(&[
            "...", //
            ".#.", //
            "...",
        ]);
        let mut engine = GameOfLife::new(&initial, &mut screen).unwrap();

        assert!(!engine.show_generation().unwrap());
        assert_eq!(engine.population(), 0);

        // All-dead is a fixed point.
        assert!(engine.show_generation().unwrap());
    }

    #[test]
    fn full_row_on_a_3x3_torus_matches_hand_computed_generations() {
        let mut screen = MockScreen::new();
        let initial = grid_from_rows(&[
            "...", //
            "###", //
            "...",
        ]);
        let mut engine = GameOfLife::new(&initial, &mut screen).unwrap();

        // On the torus every dead cell borders all three live cells, and
        // each live cell keeps exactly two live row-mates: the whole grid
        // fills in.
        assert!(!engine.show_generation().unwrap());
        assert_eq!(snapshot(&engine), vec!["###", "###", "###"]);

        // Fully populated, every cell has eight live neighbors and dies.
        assert!(!engine.show_generation().unwrap());
        assert_eq!(snapshot(&engine), vec!["...", "...", "..."]);

        assert!(engine.show_generation().unwrap());
    }

    #[test]
    fn block_still_life_converges_on_the_first_call() {
        let mut screen = MockScreen::new();
        let initial = grid_from_rows(&[
            "......", //
            "......", //
            "..##..", //
            "..##..", //
            "......", //
            "......",
        ]);
        let mut engine = GameOfLife::new(&initial, &mut screen).unwrap();

        assert!(engine.show_generation().unwrap());
        assert_eq!(
            snapshot(&engine),
            vec!["......", "......", "..##..", "..##..", "......", "......"]
        );
    }

    #[test]
    fn blinker_alternates_between_two_states_and_never_converges() {
        let horizontal = grid_from_rows(&[
            ".....", //
            ".....", //
            ".###.", //
            ".....", //
            ".....",
        ]);
        let vertical = vec![
            ".....".to_string(),
            "..#..".to_string(),
            "..#..".to_string(),
            "..#..".to_string(),
            ".....".to_string(),
        ];

        let mut screen = MockScreen::new();
        let mut engine = GameOfLife::new(&horizontal, &mut screen).unwrap();

        for step in 0..10 {
            assert!(!engine.show_generation().unwrap(), "converged at step {}", step);
            if step % 2 == 0 {
                assert_eq!(snapshot(&engine), vertical);
            } else {
                assert_eq!(
                    snapshot(&engine),
                    vec![".....", ".....", ".###.", ".....", "....."]
                );
            }
        }
    }

    #[test]
    fn initial_state_is_copied_not_aliased() {
        let mut screen = MockScreen::new();
        let mut initial = grid_from_rows(&[
            "##", //
            "..",
        ]);
        let engine = GameOfLife::new(&initial, &mut screen).unwrap();

        initial[0][0] = false;
        initial[1][1] = true;

        assert!(engine.is_alive(0, 0));
        assert!(!engine.is_alive(1, 1));
    }

    #[test]
    fn every_generation_plots_each_cell_once_then_refreshes_once() {
        let mut screen = MockScreen::new();
        {
            let initial = grid_from_rows(&[
                ".#.#.", //
                "#...#", //
                ".##..", //
                "....#",
            ]);
            let mut engine = GameOfLife::new(&initial, &mut screen).unwrap();
            engine.show_generation().unwrap();
            engine.show_generation().unwrap();
        }

        let calls = screen.calls();
        let frame_len = 5 * 4 + 1;
        assert_eq!(calls.len(), 2 * frame_len);
        assert_full_frame(&calls[..frame_len], 5, 4);
        assert_full_frame(&calls[frame_len..], 5, 4);
    }

    #[test]
    fn live_cells_plot_white_and_dead_cells_plot_black() {
        let mut screen = MockScreen::new();
        {
            let initial = grid_from_rows(&[
                ".#", //
                "..",
            ]);
            let mut engine = GameOfLife::new(&initial, &mut screen).unwrap();
            engine.show_generation().unwrap();
        }

        assert_eq!(screen.last_color_at(0, 1), Some(ALIVE_COLOR));
        assert_eq!(screen.last_color_at(0, 0), Some(DEAD_COLOR));
        assert_eq!(screen.last_color_at(1, 0), Some(DEAD_COLOR));
    }

    #[test]
    fn clear_screen_is_display_only() {
        let horizontal = grid_from_rows(&[
            ".....", //
            ".....", //
            ".###.", //
            ".....", //
            ".....",
        ]);

        let mut screen = MockScreen::new();
        {
            let mut engine = GameOfLife::new(&horizontal, &mut screen).unwrap();
            engine.clear_screen();

            // The next generation is computed from the untouched grid.
            assert!(!engine.show_generation().unwrap());
            assert_eq!(
                snapshot(&engine),
                vec![".....", "..#..", "..#..", "..#..", "....."]
            );
        }

        // clear_screen plotted one black pixel per cell and no refresh.
        let calls = screen.calls();
        assert_eq!(screen.refresh_count(), 1);
        assert_eq!(screen.set_pixel_count(), 2 * 25);
        assert_eq!(calls.len(), 2 * 25 + 1);
        assert!(calls[..25]
            .iter()
            .all(|call| matches!(call, ScreenCall::SetPixel { color, .. } if *color == DEAD_COLOR)));
    }

    #[test]
    fn refresh_failure_propagates_and_leaves_the_grid_unchanged() {
        let mut screen = MockScreen::new();
        screen.fail_next_refresh();

        let initial = grid_from_rows(&[
            ".....", //
            ".....", //
            ".###.", //
            ".....", //
            ".....",
        ]);
        let mut engine = GameOfLife::new(&initial, &mut screen).unwrap();

        assert!(engine.show_generation().is_err());
        assert_eq!(
            snapshot(&engine),
            vec![".....", ".....", ".###.", ".....", "....."]
        );

        // The failure was transient; the next call proceeds normally.
        assert!(!engine.show_generation().unwrap());
        assert_eq!(
            snapshot(&engine),
            vec![".....", "..#..", "..#..", "..#..", "....."]
        );
    }
}
