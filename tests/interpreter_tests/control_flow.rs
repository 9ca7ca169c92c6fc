use super::*;

mod if_tests {
  use super::*;

  #[test]
  fn positive_condition_takes_body() {
    assert_eq!(interpret("if(5, 10, 20)").unwrap(), "10");
  }

  #[test]
  fn zero_or_negative_condition_takes_else() {
    assert_eq!(interpret("if(0, 10, 20)").unwrap(), "20");
    assert_eq!(interpret("if(-1, 10, 20)").unwrap(), "20");
  }

  #[test]
  fn condition_is_evaluated() {
    assert_eq!(
      interpret_all(&["x := 3", "if(x - 2, x * 10, 0)"]).unwrap(),
      "30"
    );
  }

  #[test]
  fn untaken_branch_does_not_run() {
    assert_eq!(
      interpret_all(&["if(1, 10, y := 5)", "y"]).unwrap(),
      "y"
    );
    assert_eq!(
      interpret_all(&["if(0, y := 5, 10)", "y"]).unwrap(),
      "y"
    );
  }

  #[test]
  fn taken_branch_side_effects_persist() {
    assert_eq!(interpret_all(&["if(1, y := 5, 0)", "y"]).unwrap(), "5");
  }

  #[test]
  fn condition_is_resolved_numerically() {
    assert_eq!(interpret("if(1 / 2, 10, 20)").unwrap(), "10");
    assert_eq!(interpret("if(cos(2), 10, 20)").unwrap(), "20");
    assert_eq!(
      interpret_all(&["h := 1 / 2", "if(h - 1, 10, 20)"]).unwrap(),
      "20"
    );
  }

  #[test]
  fn symbolic_condition_fails() {
    let message = error_message(interpret("if(x, 1, 2)"));
    assert!(message.contains("if: invalid condition"), "{message}");
  }

  #[test]
  fn symbolic_branch_fails() {
    let message = error_message(interpret("if(1, y, 2)"));
    assert!(message.contains("if: invalid body/else"), "{message}");
  }
}

mod repeat_tests {
  use super::*;

  #[test]
  fn runs_body_count_times() {
    assert_eq!(
      interpret_all(&["n := 0", "repeat(3, n := n + 1)", "n"]).unwrap(),
      "3"
    );
  }

  #[test]
  fn returns_last_result() {
    assert_eq!(
      interpret_all(&["n := 0", "repeat(4, n := n + 2)"]).unwrap(),
      "8"
    );
  }

  #[test]
  fn fractional_count_is_floored() {
    assert_eq!(
      interpret_all(&["n := 0", "repeat(2.7, n := n + 1)"]).unwrap(),
      "2"
    );
  }

  #[test]
  fn zero_count_returns_zero() {
    assert_eq!(
      interpret_all(&["n := 0", "repeat(0, n := n + 1)", "n"]).unwrap(),
      "0"
    );
    assert_eq!(interpret("repeat(0, 5)").unwrap(), "0");
  }

  #[test]
  fn count_is_resolved_numerically() {
    assert_eq!(
      interpret_all(&["n := 0", "repeat(10 / 4, n := n + 1)"]).unwrap(),
      "2"
    );
    assert_eq!(interpret("repeat(sin(1) + 1, 7)").unwrap(), "7");
  }

  #[test]
  fn negative_count_fails() {
    let message = error_message(interpret("repeat(-1, 5)"));
    assert!(message.contains("cannot be negative"), "{message}");
  }

  #[test]
  fn symbolic_count_fails() {
    let message = error_message(interpret("repeat(k, 5)"));
    assert!(message.contains("repeat: invalid repeat count"), "{message}");
  }

  #[test]
  fn symbolic_body_fails() {
    let message = error_message(interpret("repeat(2, z)"));
    assert!(message.contains("repeat: invalid body"), "{message}");
  }
}

mod for_tests {
  use super::*;

  #[test]
  fn sums_body_results() {
    assert_eq!(interpret("for(0, 100, i, 1, i)").unwrap(), "4950");
  }

  #[test]
  fn end_is_exclusive() {
    assert_eq!(interpret("for(0, 10, i, 3, i)").unwrap(), "18");
    assert_eq!(interpret("for(0, 3, i, 1, 1)").unwrap(), "3");
  }

  #[test]
  fn empty_range_gives_zero() {
    assert_eq!(interpret("for(5, 5, i, 1, i)").unwrap(), "0");
    assert_eq!(interpret("for(5, 0, i, 1, i)").unwrap(), "0");
  }

  #[test]
  fn negative_step_starts_one_step_below_start() {
    // 9 + 8 + ... + 1
    assert_eq!(interpret("for(10, 0, i, -1, i)").unwrap(), "45");
  }

  #[test]
  fn non_numeric_body_results_are_skipped() {
    assert_eq!(interpret("for(0, 3, i, 1, z)").unwrap(), "0");
  }

  #[test]
  fn nested_loops() {
    assert_eq!(
      interpret("for(0, 3, i, 1, for(0, 3, j, 1, i * j))").unwrap(),
      "9"
    );
  }

  #[test]
  fn body_can_update_globals() {
    assert_eq!(
      interpret_all(&["s := 0", "for(1, 4, i, 1, s := s + i)", "s"]).unwrap(),
      "6"
    );
  }

  #[test]
  fn loop_variable_is_unbound_afterwards() {
    assert_eq!(interpret_all(&["for(0, 3, i, 1, i)", "i"]).unwrap(), "i");
  }

  #[test]
  fn loop_variable_is_unbound_after_failure() {
    let mut session = Session::new();
    assert!(session.interpret("for(0, 3, i, 1, toDouble(q))").is_err());
    assert!(!session.variables().contains("i"));
    assert_eq!(session.interpret("i").unwrap(), "i");
  }

  #[test]
  fn bounds_and_step_are_resolved_numerically() {
    assert_eq!(interpret("for(0, 1, i, 1 / 4, i)").unwrap(), "1.5");
    assert_eq!(interpret("for(1 / 2, 3, i, 1, 1)").unwrap(), "3");
  }

  #[test]
  fn step_below_float_spacing_fails() {
    let mut session = Session::new();
    let message =
      error_message(session.interpret("for(1e16, 1e16 + 10, i, 0.5, 1)"));
    assert!(message.contains("too small to advance"), "{message}");
    assert!(!session.variables().contains("i"));
  }

  #[test]
  fn bound_loop_variable_fails() {
    let message =
      error_message(interpret_all(&["i := 1", "for(0, 3, i, 1, i)"]));
    assert!(message.contains("variable i is already defined"), "{message}");
  }

  #[test]
  fn zero_step_fails() {
    let message = error_message(interpret("for(0, 3, i, 0, i)"));
    assert!(message.contains("step must be nonzero"), "{message}");
  }

  #[test]
  fn symbolic_bound_fails() {
    let message = error_message(interpret("for(0, n, i, 1, i)"));
    assert!(message.contains("for: invalid end"), "{message}");
  }

  #[test]
  fn loop_variable_must_be_a_name() {
    let message = error_message(interpret("for(0, 3, 2, 1, 1)"));
    assert!(message.contains("invalid loop variable 2"), "{message}");
  }

  #[test]
  fn wrapped_loop_variable_is_accepted() {
    assert_eq!(interpret("for(0, 3, f(i), 1, i)").unwrap(), "3");
  }
}

mod randomly_pick_tests {
  use super::*;

  #[test]
  fn evaluates_exactly_one_body() {
    for seed in 0..20 {
      seed_rng(seed);
      let mut session = Session::new();
      let result = session.interpret("randomlyPick(a := 1, b := 2)").unwrap();
      let vars = session.variables();
      assert_ne!(vars.contains("a"), vars.contains("b"));
      if vars.contains("a") {
        assert_eq!(result, "1");
      } else {
        assert_eq!(result, "2");
      }
    }
    unseed_rng();
  }

  #[test]
  fn picks_each_body_about_half_the_time() {
    seed_rng(42);
    let mut session = Session::new();
    let mut first = 0;
    for _ in 0..10_000 {
      if session.interpret("randomlyPick(1, 0)").unwrap() == "1" {
        first += 1;
      }
    }
    unseed_rng();
    assert!((4500..5500).contains(&first), "first picked {first} times");
  }

  #[test]
  fn same_seed_same_choices() {
    let run = || {
      seed_rng(7);
      let mut session = Session::new();
      let picks: Vec<String> = (0..32)
        .map(|_| session.interpret("randomlyPick(1, 2)").unwrap())
        .collect();
      unseed_rng();
      picks
    };
    assert_eq!(run(), run());
  }

  #[test]
  fn result_may_be_symbolic() {
    seed_rng(3);
    let result = interpret("randomlyPick(x, x)").unwrap();
    unseed_rng();
    assert_eq!(result, "x");
  }
}
