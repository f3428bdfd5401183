mod probe_tests;
